//! Effect dispatch
//!
//! Applies attribute deltas addressed by wire tokens to a character. The
//! token is validated into the closed [`Attribute`] enum here; an unknown
//! token is logged and skipped, never an error, so a content typo cannot
//! abort a session.

use std::collections::HashMap;

use tracing::warn;

use crate::attribute::Attribute;
use crate::character::Character;

/// Apply a single delta addressed by its wire token.
///
/// Unknown tokens are a warn-and-skip, keeping malformed content from
/// aborting a session. Clamping happens inside the character's setter.
pub fn apply(character: &mut Character, token: &str, delta: i32) {
    match token.parse::<Attribute>() {
        Ok(attribute) => character.apply_delta(attribute, delta),
        Err(_) => warn!(%token, delta, "unknown attribute in effect, skipping"),
    }
}

/// Apply every entry of a multi-attribute effect map independently.
///
/// Unknown keys are skipped individually; the remaining entries still
/// apply (partial application is expected).
pub fn apply_multi(character: &mut Character, effects: &HashMap<String, i32>) {
    for (token, delta) in effects {
        apply(character, token, *delta);
    }
}
