//! Error types for the life simulation core engine

use thiserror::Error;

use crate::phase::Phase;
use crate::relationship::InteractionKind;

/// Main error type for the life simulation core engine
#[derive(Error, Debug)]
pub enum LifeSimError {
    #[error("Invalid event definition: {0}")]
    InvalidEvent(String),

    #[error("Event source error: {0}")]
    Source(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("Unknown interaction: {0}")]
    UnknownInteraction(String),

    #[error("Person not found: {0}")]
    PersonNotFound(String),

    #[error("Interaction {kind} is not available during {phase}")]
    InteractionUnavailable { kind: InteractionKind, phase: Phase },
}

/// Result type alias for the life simulation core engine
pub type Result<T> = std::result::Result<T, LifeSimError>;

/// Non-fatal signal returned when a phase's event pool is exhausted.
///
/// The caller decides the messaging; the session keeps running.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("No events available for phase {0}")]
pub struct NoEventsAvailable(pub Phase);
