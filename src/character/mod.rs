//! Character attribute model
//!
//! Owns the bounded attributes, age and the observer registry. Every
//! mutation goes through a setter that clamps and then synchronously
//! notifies subscribers; the save snapshot is the serialized value of this
//! struct (observers excluded), and a loaded snapshot supersedes the live
//! character.

mod observer;

pub use observer::{Observer, ObserverRegistry};

use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::attribute::Attribute;
use crate::phase::Phase;

const ATTRIBUTE_MIN: i32 = 0;
const ATTRIBUTE_MAX: i32 = 100;
const ATTRIBUTE_DEFAULT: i32 = 50;

/// A simulated character.
#[derive(Debug, Clone, Serialize)]
pub struct Character {
    name: String,
    age: u32,
    health: i32,
    sanity: i32,
    happiness: i32,
    intelligence: i32,
    charisma: i32,
    appearance: i32,
    finances: i32,
    stage: Phase,
    #[serde(skip)]
    observers: ObserverRegistry,
}

// Snapshots go through the same boundary validation as live mutations:
// bounded attributes are clamped and the stage label is re-derived from
// age, so a hand-edited save cannot smuggle out-of-range state in.
impl<'de> Deserialize<'de> for Character {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Snapshot {
            name: String,
            age: u32,
            health: i32,
            sanity: i32,
            happiness: i32,
            intelligence: i32,
            charisma: i32,
            appearance: i32,
            finances: i32,
            #[serde(default)]
            #[allow(dead_code)]
            stage: Option<Phase>,
        }

        let snapshot = Snapshot::deserialize(deserializer)?;
        Ok(Character {
            name: snapshot.name,
            age: snapshot.age,
            health: Self::clamp(snapshot.health),
            sanity: Self::clamp(snapshot.sanity),
            happiness: Self::clamp(snapshot.happiness),
            intelligence: Self::clamp(snapshot.intelligence),
            charisma: Self::clamp(snapshot.charisma),
            appearance: Self::clamp(snapshot.appearance),
            finances: snapshot.finances,
            stage: Phase::from_age(snapshot.age),
            observers: ObserverRegistry::new(),
        })
    }
}

impl Character {
    /// Create a newborn character with default attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: 0,
            health: ATTRIBUTE_MAX,
            sanity: ATTRIBUTE_MAX,
            happiness: ATTRIBUTE_DEFAULT,
            intelligence: ATTRIBUTE_DEFAULT,
            charisma: ATTRIBUTE_DEFAULT,
            appearance: ATTRIBUTE_DEFAULT,
            finances: 0,
            stage: Phase::from_age(0),
            observers: ObserverRegistry::new(),
        }
    }

    fn clamp(value: i32) -> i32 {
        value.clamp(ATTRIBUTE_MIN, ATTRIBUTE_MAX)
    }

    fn notify(&self, message: &str) {
        self.observers.notify(message);
    }

    // Observer registry

    pub fn subscribe(&mut self, observer: Arc<dyn Observer>) {
        self.observers.subscribe(observer);
    }

    pub fn unsubscribe(&mut self, observer: &Arc<dyn Observer>) {
        self.observers.unsubscribe(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // Identity

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.notify(&format!("Name changed to {}", self.name));
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    /// Current presentation life-stage label.
    pub fn stage(&self) -> Phase {
        self.stage
    }

    // Clamped attributes

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn set_health(&mut self, value: i32) {
        self.health = Self::clamp(value);
        self.notify(&format!("Health updated to {}", self.health));
    }

    pub fn alter_health(&mut self, delta: i32) {
        self.set_health(self.health + delta);
    }

    pub fn sanity(&self) -> i32 {
        self.sanity
    }

    pub fn set_sanity(&mut self, value: i32) {
        self.sanity = Self::clamp(value);
        self.notify(&format!("Sanity updated to {}", self.sanity));
    }

    pub fn alter_sanity(&mut self, delta: i32) {
        self.set_sanity(self.sanity + delta);
    }

    pub fn happiness(&self) -> i32 {
        self.happiness
    }

    pub fn set_happiness(&mut self, value: i32) {
        self.happiness = Self::clamp(value);
        self.notify(&format!("Happiness updated to {}", self.happiness));
    }

    pub fn alter_happiness(&mut self, delta: i32) {
        self.set_happiness(self.happiness + delta);
    }

    pub fn intelligence(&self) -> i32 {
        self.intelligence
    }

    pub fn set_intelligence(&mut self, value: i32) {
        self.intelligence = Self::clamp(value);
        self.notify(&format!("Intelligence updated to {}", self.intelligence));
    }

    pub fn alter_intelligence(&mut self, delta: i32) {
        self.set_intelligence(self.intelligence + delta);
    }

    pub fn charisma(&self) -> i32 {
        self.charisma
    }

    pub fn set_charisma(&mut self, value: i32) {
        self.charisma = Self::clamp(value);
        self.notify(&format!("Charisma updated to {}", self.charisma));
    }

    pub fn alter_charisma(&mut self, delta: i32) {
        self.set_charisma(self.charisma + delta);
    }

    pub fn appearance(&self) -> i32 {
        self.appearance
    }

    pub fn set_appearance(&mut self, value: i32) {
        self.appearance = Self::clamp(value);
        self.notify(&format!("Appearance updated to {}", self.appearance));
    }

    pub fn alter_appearance(&mut self, delta: i32) {
        self.set_appearance(self.appearance + delta);
    }

    // Finances: unbounded, may go negative

    pub fn finances(&self) -> i32 {
        self.finances
    }

    pub fn set_finances(&mut self, value: i32) {
        self.finances = value;
        self.notify(&format!("Finances updated to {}", self.finances));
    }

    pub fn alter_finances(&mut self, delta: i32) {
        self.set_finances(self.finances + delta);
    }

    /// Read an attribute value through the closed enum.
    pub fn attribute(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Health => self.health,
            Attribute::Sanity => self.sanity,
            Attribute::Happiness => self.happiness,
            Attribute::Intelligence => self.intelligence,
            Attribute::Charisma => self.charisma,
            Attribute::Appearance => self.appearance,
            Attribute::Finances => self.finances,
        }
    }

    /// Apply a delta to an attribute through its clamping setter.
    pub fn apply_delta(&mut self, attribute: Attribute, delta: i32) {
        match attribute {
            Attribute::Health => self.alter_health(delta),
            Attribute::Sanity => self.alter_sanity(delta),
            Attribute::Happiness => self.alter_happiness(delta),
            Attribute::Intelligence => self.alter_intelligence(delta),
            Attribute::Charisma => self.alter_charisma(delta),
            Attribute::Appearance => self.alter_appearance(delta),
            Attribute::Finances => self.alter_finances(delta),
        }
    }

    /// Advance the character by one year.
    ///
    /// Increments age, costs one point of health through the clamped
    /// setter, re-evaluates the life-stage label, and returns the
    /// previous age.
    pub fn age_up(&mut self) -> u32 {
        let previous = self.age;
        self.age += 1;
        self.notify(&format!("Aging: age = {}", self.age));
        self.alter_health(-1);
        self.refresh_stage();
        previous
    }

    /// Re-derive the presentation stage from the current age.
    fn refresh_stage(&mut self) {
        let next = Phase::from_age(self.age);
        if next != self.stage {
            info!(from = %self.stage, to = %next, "life stage transition");
            self.stage = next;
            self.notify(&format!("Life stage changed to {}", next));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        messages: Mutex<Vec<String>>,
    }

    impl Observer for Recorder {
        fn update(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    #[test]
    fn test_new_character_defaults() {
        let character = Character::new("Ada");
        assert_eq!(character.name(), "Ada");
        assert_eq!(character.age(), 0);
        assert_eq!(character.health(), 100);
        assert_eq!(character.sanity(), 100);
        assert_eq!(character.happiness(), 50);
        assert_eq!(character.intelligence(), 50);
        assert_eq!(character.charisma(), 50);
        assert_eq!(character.appearance(), 50);
        assert_eq!(character.finances(), 0);
        assert_eq!(character.stage(), Phase::EarlyInfancy);
    }

    #[test]
    fn test_setters_clamp_both_ends() {
        let mut character = Character::new("Ada");
        character.set_happiness(150);
        assert_eq!(character.happiness(), 100);
        character.set_happiness(-50);
        assert_eq!(character.happiness(), 0);
        character.set_health(101);
        assert_eq!(character.health(), 100);
        character.set_sanity(-1);
        assert_eq!(character.sanity(), 0);
    }

    #[test]
    fn test_finances_unclamped() {
        let mut character = Character::new("Ada");
        character.set_finances(-500);
        assert_eq!(character.finances(), -500);
        character.alter_finances(10_500);
        assert_eq!(character.finances(), 10_000);
    }

    #[test]
    fn test_alter_is_sugar_over_set() {
        let mut character = Character::new("Ada");
        character.set_intelligence(90);
        character.alter_intelligence(25);
        assert_eq!(character.intelligence(), 100);
        character.alter_intelligence(-150);
        assert_eq!(character.intelligence(), 0);
    }

    #[test]
    fn test_age_up_five_years() {
        let mut character = Character::new("Ada");
        for expected_previous in 0..5 {
            assert_eq!(character.age_up(), expected_previous);
        }
        assert_eq!(character.age(), 5);
        assert_eq!(character.health(), 95);
    }

    #[test]
    fn test_age_up_updates_stage_label() {
        let mut character = Character::new("Ada");
        for _ in 0..3 {
            character.age_up();
        }
        assert_eq!(character.stage(), Phase::Preschool);
    }

    #[test]
    fn test_setters_notify_observers() {
        let mut character = Character::new("Ada");
        let recorder = Arc::new(Recorder::default());
        character.subscribe(recorder.clone());

        character.set_happiness(70);
        let messages = recorder.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("Happiness"));
        assert!(messages[0].contains("70"));
    }

    #[test]
    fn test_snapshot_round_trip_drops_observers() {
        let mut character = Character::new("Ada");
        character.subscribe(Arc::new(Recorder::default()));
        character.set_finances(-42);
        for _ in 0..7 {
            character.age_up();
        }

        let json = serde_json::to_string(&character).unwrap();
        let restored: Character = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.name(), "Ada");
        assert_eq!(restored.age(), 7);
        assert_eq!(restored.finances(), -42);
        assert_eq!(restored.health(), 93);
        assert_eq!(restored.stage(), Phase::MiddleChildhood);
        assert_eq!(restored.observer_count(), 0);
    }

    #[test]
    fn test_tampered_snapshot_is_normalized_on_load() {
        let json = r#"{
            "name": "Ada",
            "age": 45,
            "health": 500,
            "sanity": -20,
            "happiness": 70,
            "intelligence": 101,
            "charisma": 50,
            "appearance": 50,
            "finances": -3000,
            "stage": "EarlyInfancy"
        }"#;
        let restored: Character = serde_json::from_str(json).unwrap();

        assert_eq!(restored.health(), 100);
        assert_eq!(restored.sanity(), 0);
        assert_eq!(restored.intelligence(), 100);
        // Finances stay unbounded.
        assert_eq!(restored.finances(), -3000);
        // The stored stage is ignored; age wins.
        assert_eq!(restored.stage(), Phase::MiddleAge);
    }

    #[test]
    fn test_snapshot_without_stage_field_loads() {
        let json = r#"{
            "name": "Ada",
            "age": 20,
            "health": 90,
            "sanity": 90,
            "happiness": 50,
            "intelligence": 50,
            "charisma": 50,
            "appearance": 50,
            "finances": 0
        }"#;
        let restored: Character = serde_json::from_str(json).unwrap();
        assert_eq!(restored.stage(), Phase::LateAdolescence);
    }

    #[test]
    fn test_apply_delta_matches_setters() {
        let mut character = Character::new("Ada");
        character.apply_delta(Attribute::Charisma, 60);
        assert_eq!(character.charisma(), 100);
        character.apply_delta(Attribute::Finances, -30);
        assert_eq!(character.finances(), -30);
    }
}
