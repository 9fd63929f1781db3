//! Lifepath Core - Life simulation core engine
//!
//! This crate provides the core of a life simulator: a character with
//! clamped observable attributes, phase-scoped event pools loaded lazily
//! from content files, an event engine that never repeats an event within
//! a life phase, and a relationship engine with phase-gated interactions.
//!
//! The engine is deterministic given a seeded [`rng::RandomSource`],
//! which makes whole sessions replayable in tests.

pub mod attribute;
pub mod character;
pub mod effect;
pub mod error;
pub mod event;
pub mod phase;
pub mod relationship;
pub mod rng;

pub use crate::attribute::Attribute;
pub use crate::character::{Character, Observer};
pub use crate::error::{LifeSimError, NoEventsAvailable, Result};
pub use crate::event::{ChoiceProvider, EventEngine, EventRepository, JsonFileSource, Outcome};
pub use crate::phase::Phase;
pub use crate::relationship::{InteractionKind, Proposal, RelationshipEngine, RelationshipKind};
pub use crate::rng::{RandomSource, StdRandom};
