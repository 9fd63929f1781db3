//! Relationship engine
//!
//! Mirrors the event engine's shape: a pool of people plus randomized
//! interaction effects dispatched through the character's clamping
//! setters. Availability of each interaction is gated on the character's
//! current life phase.

use ahash::AHashMap;
use tracing::info;

use crate::character::Character;
use crate::error::{LifeSimError, Result};
use crate::phase::Phase;
use crate::relationship::interaction::InteractionKind;
use crate::relationship::person::{Person, Profession, Relationship, RelationshipKind};
use crate::rng::RandomSource;

/// Relationship level required before a dating proposal can be made.
pub const DATING_THRESHOLD: i32 = 40;
/// Relationship level required before a marriage proposal can be made.
pub const MARRIAGE_THRESHOLD: i32 = 70;

/// A romantic proposal the character can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proposal {
    Dating,
    Marriage,
}

/// Starting finances derived from the parents' professions.
///
/// Takes the better of the two family income ranges; with no employed
/// parent the household starts modestly.
pub fn initial_finances(
    father: Option<&Profession>,
    mother: Option<&Profession>,
    rng: &mut dyn RandomSource,
) -> i32 {
    let (min, max) = match (father, mother) {
        (Some(f), Some(m)) => (
            f.finances_min.max(m.finances_min),
            f.finances_max.max(m.finances_max),
        ),
        (Some(f), None) => (f.finances_min, f.finances_max),
        (None, Some(m)) => (m.finances_min, m.finances_max),
        (None, None) => (0, 3000),
    };
    rng.uniform(min, max)
}

/// Tracks and mutates the character's bonds with other people.
pub struct RelationshipEngine {
    relationships: AHashMap<String, Relationship>,
    rng: Box<dyn RandomSource>,
}

impl RelationshipEngine {
    pub fn new(rng: Box<dyn RandomSource>) -> Self {
        Self {
            relationships: AHashMap::new(),
            rng,
        }
    }

    /// Register a new bond, keyed by the person's id.
    pub fn add(&mut self, person: Person, kind: RelationshipKind) {
        let id = person.id().to_string();
        self.relationships
            .insert(id, Relationship::new(person, kind));
    }

    pub fn get(&self, person_id: &str) -> Option<&Relationship> {
        self.relationships.get(person_id)
    }

    pub fn all(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.values()
    }

    pub fn by_kind(&self, kind: RelationshipKind) -> Vec<&Relationship> {
        self.relationships
            .values()
            .filter(|r| r.kind() == kind)
            .collect()
    }

    /// Family surname, taken from the father first, then the mother.
    pub fn family_surname(&self) -> Option<&str> {
        self.relationships
            .values()
            .find(|r| r.kind() == RelationshipKind::Father)
            .or_else(|| {
                self.relationships
                    .values()
                    .find(|r| r.kind() == RelationshipKind::Mother)
            })
            .map(|r| r.person().surname())
    }

    /// Advance every bond by one year.
    pub fn advance_year(&mut self) {
        for relationship in self.relationships.values_mut() {
            relationship.advance_year(self.rng.as_mut());
        }
    }

    /// Interactions the character may attempt at their current age.
    pub fn available_interactions(&self, character: &Character) -> &'static [InteractionKind] {
        InteractionKind::available_for(Phase::from_age(character.age()))
    }

    /// Perform an interaction with a known person.
    ///
    /// Verifies phase availability, applies the kind-specific randomized
    /// deltas to the bond and the character, and returns a descriptive
    /// outcome.
    pub fn interact(
        &mut self,
        character: &mut Character,
        person_id: &str,
        kind: InteractionKind,
    ) -> Result<String> {
        let phase = Phase::from_age(character.age());
        if !InteractionKind::available_for(phase).contains(&kind) {
            return Err(LifeSimError::InteractionUnavailable { kind, phase });
        }

        let relationship = self
            .relationships
            .get_mut(person_id)
            .ok_or_else(|| LifeSimError::PersonNotFound(person_id.to_string()))?;
        let rng = self.rng.as_mut();
        let full_name = relationship.person().full_name();

        let mut message;
        let level_delta;
        let happiness_delta;

        match kind {
            InteractionKind::Chat => {
                level_delta = rng.uniform(1, 8);
                happiness_delta = rng.uniform(1, 4);
                message = format!("You had a pleasant conversation with {}.", full_name);
            }
            InteractionKind::Gift => {
                level_delta = rng.uniform(5, 15);
                happiness_delta = rng.uniform(3, 8);
                message = format!("You gave {} a gift. They were thrilled!", full_name);
                character.alter_finances(-rng.uniform(10, 50));
            }
            InteractionKind::Insult => {
                level_delta = -rng.uniform(10, 20);
                happiness_delta = -rng.uniform(5, 10);
                message = format!("You insulted {}. They were upset!", full_name);
                if rng.chance(30) {
                    message.push_str(" They fired back an insult of their own.");
                    character.alter_happiness(-rng.uniform(3, 8));
                }
                if relationship.kind().is_romantic() && rng.chance(10) {
                    message.push_str(" The relationship was severely damaged.");
                    relationship.mark_strained();
                }
            }
            InteractionKind::Play => {
                level_delta = rng.uniform(3, 10);
                happiness_delta = rng.uniform(3, 7);
                message = format!("You played with {}. It was a lot of fun!", full_name);
            }
            InteractionKind::Smile => {
                level_delta = rng.uniform(1, 3);
                happiness_delta = rng.uniform(1, 2);
                message = format!("You smiled at {}.", full_name);
            }
            InteractionKind::Stroll => {
                level_delta = rng.uniform(4, 12);
                happiness_delta = rng.uniform(3, 8);
                message = format!("You went for a stroll with {}. Time well spent.", full_name);
                character.alter_finances(-rng.uniform(5, 30));
            }
        }

        relationship.alter_level(level_delta);
        character.alter_happiness(happiness_delta);
        message.push_str(&format!(" Relationship level: {}", relationship.level()));

        info!(person = %person_id, interaction = %kind, level = relationship.level(), "interaction resolved");
        Ok(message)
    }

    /// Make a romantic proposal.
    ///
    /// Gated on the bond's level; an eligible proposal is accepted with
    /// probability equal to the level (as a percentage). Rejection costs
    /// both the bond and the character's happiness.
    pub fn propose(
        &mut self,
        character: &mut Character,
        person_id: &str,
        proposal: Proposal,
    ) -> Result<String> {
        let relationship = self
            .relationships
            .get_mut(person_id)
            .ok_or_else(|| LifeSimError::PersonNotFound(person_id.to_string()))?;
        let full_name = relationship.person().full_name();

        let (required_kind, threshold, new_kind) = match proposal {
            Proposal::Dating => (
                RelationshipKind::Friendship,
                DATING_THRESHOLD,
                RelationshipKind::Dating,
            ),
            Proposal::Marriage => (
                RelationshipKind::Dating,
                MARRIAGE_THRESHOLD,
                RelationshipKind::Marriage,
            ),
        };

        if relationship.kind() != required_kind || relationship.level() < threshold {
            return Ok(format!(
                "{} is not ready for that step yet.",
                full_name
            ));
        }

        if self.rng.chance(relationship.level()) {
            relationship.set_kind(new_kind);
            relationship.alter_level(10);
            character.alter_happiness(10);
            info!(person = %person_id, ?proposal, "proposal accepted");
            Ok(match proposal {
                Proposal::Dating => format!("{} said yes! You are now dating.", full_name),
                Proposal::Marriage => format!("{} said yes! You are now married.", full_name),
            })
        } else {
            relationship.alter_level(-10);
            character.alter_happiness(-8);
            info!(person = %person_id, ?proposal, "proposal rejected");
            Ok(format!("{} turned you down.", full_name))
        }
    }
}
