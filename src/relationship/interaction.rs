//! Interaction kinds and their per-phase availability

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LifeSimError;
use crate::phase::Phase;

/// Ways the character can interact with someone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionKind {
    Chat,
    Gift,
    Insult,
    Play,
    Smile,
    Stroll,
}

impl InteractionKind {
    /// Wire token for this interaction, as used by content and saves.
    pub fn token(self) -> &'static str {
        match self {
            InteractionKind::Chat => "conversar",
            InteractionKind::Gift => "presente",
            InteractionKind::Insult => "insultar",
            InteractionKind::Play => "brincar",
            InteractionKind::Smile => "sorrir",
            InteractionKind::Stroll => "passear",
        }
    }

    /// Interactions available during a life phase.
    ///
    /// Infants cannot interact; the repertoire widens with age and from
    /// mid-adolescence onward stays fixed.
    pub fn available_for(phase: Phase) -> &'static [InteractionKind] {
        use InteractionKind::*;
        match phase {
            Phase::EarlyInfancy => &[],
            Phase::Preschool => &[Play, Smile],
            Phase::MiddleChildhood => &[Play, Chat, Smile],
            Phase::EarlyAdolescence => &[Chat, Gift, Play, Stroll],
            _ => &[Chat, Gift, Insult, Stroll],
        }
    }
}

impl FromStr for InteractionKind {
    type Err = LifeSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "conversar" => Ok(InteractionKind::Chat),
            "presente" => Ok(InteractionKind::Gift),
            "insultar" => Ok(InteractionKind::Insult),
            "brincar" => Ok(InteractionKind::Play),
            "sorrir" => Ok(InteractionKind::Smile),
            "passear" => Ok(InteractionKind::Stroll),
            _ => Err(LifeSimError::UnknownInteraction(s.to_string())),
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
