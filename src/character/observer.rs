//! Observer registry for attribute change notifications

use std::sync::Arc;

/// Subscriber notified whenever a character attribute changes.
pub trait Observer {
    /// Receive a human-readable change description.
    fn update(&self, message: &str);
}

/// Ordered collection of observers with identity-based dedup.
#[derive(Default, Clone)]
pub struct ObserverRegistry {
    observers: Vec<Arc<dyn Observer>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. A handle already present (same allocation) is
    /// not added twice.
    pub fn subscribe(&mut self, observer: Arc<dyn Observer>) {
        if !self.observers.iter().any(|o| Arc::ptr_eq(o, &observer)) {
            self.observers.push(observer);
        }
    }

    /// Remove an observer if present.
    pub fn unsubscribe(&mut self, observer: &Arc<dyn Observer>) {
        self.observers.retain(|o| !Arc::ptr_eq(o, observer));
    }

    /// Invoke every observer in registration order, once per call.
    pub fn notify(&self, message: &str) {
        for observer in &self.observers {
            observer.update(message);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .finish()
    }
}
