//! People, professions and relationship bonds

use serde::{Deserialize, Serialize};

use crate::rng::RandomSource;

/// Occupation of a person, with the family income range it implies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profession {
    pub name: String,
    pub salary: i32,
    pub finances_min: i32,
    pub finances_max: i32,
}

/// Someone the main character relates to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    id: String,
    name: String,
    surname: String,
    age: u32,
    gender: String,
    compatibility: i32,
    happiness: i32,
    profession: Option<Profession>,
}

impl Person {
    /// Create a person; compatibility is rolled in `[30, 100]` at
    /// creation.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        surname: impl Into<String>,
        age: u32,
        gender: impl Into<String>,
        rng: &mut dyn RandomSource,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            surname: surname.into(),
            age,
            gender: gender.into(),
            compatibility: rng.uniform(30, 100),
            happiness: 50,
            profession: None,
        }
    }

    pub fn with_profession(mut self, profession: Profession) -> Self {
        self.profession = Some(profession);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn full_name(&self) -> String {
        if self.surname.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, self.surname)
        }
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    pub fn compatibility(&self) -> i32 {
        self.compatibility
    }

    pub fn happiness(&self) -> i32 {
        self.happiness
    }

    pub fn profession(&self) -> Option<&Profession> {
        self.profession.as_ref()
    }

    pub fn salary(&self) -> i32 {
        self.profession.as_ref().map_or(0, |p| p.salary)
    }

    pub fn age_up(&mut self) {
        self.age += 1;
    }
}

/// Nature of a bond with a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipKind {
    Friendship,
    Dating,
    Marriage,
    Father,
    Mother,
    Child,
    Sibling,
    Colleague,
}

impl RelationshipKind {
    pub fn is_romantic(self) -> bool {
        matches!(self, RelationshipKind::Dating | RelationshipKind::Marriage)
    }

    pub fn label(self) -> &'static str {
        match self {
            RelationshipKind::Friendship => "friend",
            RelationshipKind::Dating => "partner",
            RelationshipKind::Marriage => "spouse",
            RelationshipKind::Father => "father",
            RelationshipKind::Mother => "mother",
            RelationshipKind::Child => "child",
            RelationshipKind::Sibling => "sibling",
            RelationshipKind::Colleague => "colleague",
        }
    }
}

/// A bond between the main character and a person.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    person: Person,
    kind: RelationshipKind,
    level: i32,
    years: u32,
    strained: bool,
}

impl Relationship {
    pub fn new(person: Person, kind: RelationshipKind) -> Self {
        Self {
            person,
            kind,
            level: 50,
            years: 0,
            strained: false,
        }
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn person_mut(&mut self) -> &mut Person {
        &mut self.person
    }

    pub fn kind(&self) -> RelationshipKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: RelationshipKind) {
        self.kind = kind;
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn set_level(&mut self, level: i32) {
        self.level = level.clamp(0, 100);
    }

    pub fn alter_level(&mut self, delta: i32) {
        self.set_level(self.level + delta);
    }

    pub fn years(&self) -> u32 {
        self.years
    }

    /// Whether the bond took serious damage (romantic fallout).
    pub fn is_strained(&self) -> bool {
        self.strained
    }

    pub fn mark_strained(&mut self) {
        self.strained = true;
    }

    /// Advance the bond by one year. Neglected bonds have a 30% chance
    /// of losing 5 points.
    pub fn advance_year(&mut self, rng: &mut dyn RandomSource) {
        self.years += 1;
        self.person.age_up();
        if rng.chance(30) {
            self.alter_level(-5);
        }
    }

    /// One-line description of the bond's current quality.
    pub fn describe(&self) -> String {
        let quality = match self.level {
            l if l > 80 => "excellent",
            l if l > 60 => "good",
            l if l < 10 => "terrible",
            l if l < 30 => "poor",
            _ => "neutral",
        };
        format!(
            "{} - {} ({}, {} years)",
            self.person.full_name(),
            self.kind.label(),
            quality,
            self.years
        )
    }
}
