//! Closed attribute enumeration
//!
//! Event content addresses attributes by the original Portuguese tokens;
//! those raw strings are validated into this enum at the parsing boundary
//! and every consumer downstream matches exhaustively.

use std::fmt;
use std::str::FromStr;

use crate::error::LifeSimError;

/// The mutable attributes of a character.
///
/// All are clamped to `[0, 100]` except `Finances`, which is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Health,
    Sanity,
    Happiness,
    Intelligence,
    Charisma,
    Appearance,
    Finances,
}

impl Attribute {
    /// Wire token for this attribute, as used by event content.
    pub fn token(self) -> &'static str {
        match self {
            Attribute::Health => "saude",
            Attribute::Sanity => "sanidade",
            Attribute::Happiness => "felicidade",
            Attribute::Intelligence => "inteligencia",
            Attribute::Charisma => "carisma",
            Attribute::Appearance => "aparencia",
            Attribute::Finances => "financas",
        }
    }

    /// Whether values of this attribute are clamped to `[0, 100]`.
    pub fn is_clamped(self) -> bool {
        !matches!(self, Attribute::Finances)
    }
}

impl FromStr for Attribute {
    type Err = LifeSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "saude" => Ok(Attribute::Health),
            "sanidade" => Ok(Attribute::Sanity),
            "felicidade" => Ok(Attribute::Happiness),
            "inteligencia" => Ok(Attribute::Intelligence),
            "carisma" => Ok(Attribute::Charisma),
            "aparencia" => Ok(Attribute::Appearance),
            "financas" => Ok(Attribute::Finances),
            _ => Err(LifeSimError::UnknownAttribute(s.to_string())),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
