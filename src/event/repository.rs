//! Phase event repository
//!
//! Lazily loads a phase's raw definitions through the [`EventSource`]
//! collaborator, validates them once, and memoizes the resulting
//! immutable pool. Cached pools are never mutated after first load, so a
//! repository can be shared read-only across sessions.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use parking_lot::RwLock;
use tracing::{info, warn};

use crate::error::{LifeSimError, Result};
use crate::event::definition::{Event, RawEvent};
use crate::phase::Phase;

/// Loader collaborator: fetches raw event definitions for a phase.
///
/// `Ok(None)` means the phase has no source data, which the repository
/// treats as an empty pool rather than an error.
pub trait EventSource {
    fn fetch(&self, phase: Phase) -> Result<Option<Vec<RawEvent>>>;
}

/// File-backed source reading `<base>/<phase key>/eventos.json`.
pub struct JsonFileSource {
    base: PathBuf,
}

impl JsonFileSource {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl EventSource for JsonFileSource {
    fn fetch(&self, phase: Phase) -> Result<Option<Vec<RawEvent>>> {
        let path = self.base.join(phase.key()).join("eventos.json");
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(LifeSimError::Source(format!(
                    "reading {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        let raws: Vec<RawEvent> = serde_json::from_str(&contents).map_err(|e| {
            LifeSimError::Deserialization(format!("{}: {}", path.display(), e))
        })?;
        Ok(Some(raws))
    }
}

/// Memoizing repository of per-phase event pools.
pub struct EventRepository {
    source: Box<dyn EventSource>,
    cache: RwLock<AHashMap<Phase, Arc<[Event]>>>,
}

impl EventRepository {
    pub fn new(source: Box<dyn EventSource>) -> Self {
        Self {
            source,
            cache: RwLock::new(AHashMap::new()),
        }
    }

    /// Load the event pool for a phase, fetching and validating on first
    /// use and serving the cached pool afterwards.
    ///
    /// Invalid definitions and duplicate ids are dropped with a warning;
    /// a missing or failing source yields an empty pool. None of these
    /// aborts the session.
    pub fn load(&self, phase: Phase) -> Arc<[Event]> {
        // Fast path: already memoized.
        {
            let cache = self.cache.read();
            if let Some(pool) = cache.get(&phase) {
                return pool.clone();
            }
        }

        let events = match self.source.fetch(phase) {
            Ok(Some(raws)) => {
                let total = raws.len();
                // Ids must be unique within a phase: the engine's consumed
                // set tracks by id, so a duplicate could never fire and
                // would inflate the pool count.
                let mut seen = AHashSet::new();
                let events: Vec<Event> = raws
                    .into_iter()
                    .filter_map(|raw| match Event::validate(raw) {
                        Ok(event) => {
                            if seen.insert(event.id.clone()) {
                                Some(event)
                            } else {
                                warn!(phase = %phase, id = %event.id, "dropping duplicate event id");
                                None
                            }
                        }
                        Err(e) => {
                            warn!(phase = %phase, error = %e, "dropping invalid event definition");
                            None
                        }
                    })
                    .collect();
                info!(phase = %phase, loaded = events.len(), total, "loaded event pool");
                events
            }
            Ok(None) => {
                warn!(phase = %phase, "no event data for phase, using empty pool");
                Vec::new()
            }
            Err(e) => {
                warn!(phase = %phase, error = %e, "event source failed, using empty pool");
                Vec::new()
            }
        };

        let pool: Arc<[Event]> = events.into();
        let mut cache = self.cache.write();
        // A racing loader may have beaten us; keep the first insert so
        // the memoization stays stable.
        cache.entry(phase).or_insert_with(|| pool.clone()).clone()
    }

    /// Whether a phase's pool has already been loaded.
    pub fn is_loaded(&self, phase: Phase) -> bool {
        self.cache.read().contains_key(&phase)
    }
}
