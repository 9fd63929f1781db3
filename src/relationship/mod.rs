//! Relationship subsystem
//!
//! People the character knows, the bonds with them, and the phase-gated
//! interactions that move those bonds. Runs beside the event engine and
//! shares the character, phase and random-source building blocks.

mod engine;
mod interaction;
mod person;


pub use engine::{
    initial_finances, Proposal, RelationshipEngine, DATING_THRESHOLD, MARRIAGE_THRESHOLD,
};
pub use interaction::InteractionKind;
pub use person::{Person, Profession, Relationship, RelationshipKind};
