//! Event subsystem: definitions, repository and engine

mod definition;
mod engine;
mod repository;


pub use definition::{Event, EventEffect, RawEvent};
pub use engine::{ChoiceProvider, EventEngine, Outcome};
pub use repository::{EventRepository, EventSource, JsonFileSource};
