//! Life-phase event engine
//!
//! Orchestrates one simulation step: resolve the character's phase,
//! ensure the phase pool is loaded, pick uniformly among the events not
//! yet fired this phase visit, obtain the player's choice, dispatch the
//! effect, and record the event as consumed.

use ahash::{AHashMap, AHashSet};
use tracing::{info, warn};

use crate::character::Character;
use crate::effect;
use crate::error::NoEventsAvailable;
use crate::event::definition::EventEffect;
use crate::event::repository::EventRepository;
use crate::phase::Phase;
use crate::rng::RandomSource;

/// Input collaborator: presents options and returns a validated index.
///
/// Re-prompting on invalid input lives behind this boundary, not in the
/// engine.
pub trait ChoiceProvider {
    fn choose(&mut self, description: &str, options: &[String]) -> usize;
}

/// Successful outcome of a processed event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied { event_id: String, choice: usize },
}

/// Stateful engine tracking which events each phase has already fired.
pub struct EventEngine {
    repository: EventRepository,
    rng: Box<dyn RandomSource>,
    consumed: AHashMap<Phase, AHashSet<String>>,
}

impl EventEngine {
    pub fn new(repository: EventRepository, rng: Box<dyn RandomSource>) -> Self {
        Self {
            repository,
            rng,
            consumed: AHashMap::new(),
        }
    }

    /// Process one random event for the character.
    ///
    /// Returns [`NoEventsAvailable`] when the current phase's pool is
    /// exhausted; the caller decides the messaging.
    pub fn process_event(
        &mut self,
        character: &mut Character,
        input: &mut dyn ChoiceProvider,
    ) -> Result<Outcome, NoEventsAvailable> {
        let phase = Phase::from_age(character.age());
        let pool = self.repository.load(phase);
        let consumed = self.consumed.entry(phase).or_default();

        let available: Vec<usize> = (0..pool.len())
            .filter(|&i| !consumed.contains(&pool[i].id))
            .collect();
        if available.is_empty() {
            return Err(NoEventsAvailable(phase));
        }

        let pick = self.rng.uniform(0, available.len() as i32 - 1) as usize;
        let chosen = &pool[available[pick]];
        info!(phase = %phase, event = %chosen.id, "event selected");

        let choice = input.choose(&chosen.description, &chosen.options);

        match &chosen.effect {
            // Multi-effect maps apply in full no matter which option was
            // picked.
            EventEffect::Multi(map) => effect::apply_multi(character, map),
            EventEffect::Single { attribute, deltas } => match deltas.get(choice) {
                Some(delta) => character.apply_delta(*attribute, *delta),
                None => warn!(
                    event = %chosen.id,
                    choice,
                    deltas = deltas.len(),
                    "chosen option has no delta, skipping effect"
                ),
            },
        }

        self.consumed
            .entry(phase)
            .or_default()
            .insert(chosen.id.clone());

        Ok(Outcome::Applied {
            event_id: chosen.id.clone(),
            choice,
        })
    }

    /// Make a phase's events replayable by clearing its consumed set.
    ///
    /// Consumed sets are strictly per-phase and persist until this is
    /// called; there is no implicit global reset.
    pub fn reset_phase(&mut self, phase: Phase) {
        self.consumed.entry(phase).or_default().clear();
        info!(phase = %phase, "phase consumed set reset");
    }

    /// React to an age change by prefetching the new phase's pool.
    ///
    /// Consumed sets are untouched; each phase's history is independent.
    pub fn on_age_changed(&self, character: &Character, previous_age: u32) {
        let current = Phase::from_age(character.age());
        if Phase::from_age(previous_age) != current {
            info!(from = %Phase::from_age(previous_age), to = %current, "phase change, prefetching pool");
            self.repository.load(current);
        }
    }

    /// Number of events still available in the character's current phase.
    pub fn available_count(&self, character: &Character) -> usize {
        let phase = Phase::from_age(character.age());
        let pool = self.repository.load(phase);
        match self.consumed.get(&phase) {
            Some(consumed) => pool.iter().filter(|e| !consumed.contains(&e.id)).count(),
            None => pool.len(),
        }
    }

    pub fn repository(&self) -> &EventRepository {
        &self.repository
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::event::definition::RawEvent;
    use crate::event::repository::EventSource;
    use crate::rng::StdRandom;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct StaticSource {
        raws: Vec<RawEvent>,
        calls: Arc<AtomicUsize>,
    }

    impl EventSource for StaticSource {
        fn fetch(&self, _phase: Phase) -> Result<Option<Vec<RawEvent>>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(self.raws.clone()))
        }
    }

    /// Input mock always choosing the same option index.
    struct FixedChoice(usize);

    impl ChoiceProvider for FixedChoice {
        fn choose(&mut self, _description: &str, _options: &[String]) -> usize {
            self.0
        }
    }

    fn single_raw(id: &str, attribute: &str, deltas: Vec<i32>) -> RawEvent {
        RawEvent {
            id: id.to_string(),
            descricao: format!("Event {}", id),
            opcoes: deltas.iter().map(|d| format!("Option {}", d)).collect(),
            efeitos: Some(deltas),
            atributo: Some(attribute.to_string()),
            efeitos_multiplos: None,
        }
    }

    fn engine_with(raws: Vec<RawEvent>) -> (EventEngine, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let repo = EventRepository::new(Box::new(StaticSource {
            raws,
            calls: calls.clone(),
        }));
        (
            EventEngine::new(repo, Box::new(StdRandom::seeded(11))),
            calls,
        )
    }

    #[test]
    fn test_single_effect_option_zero() {
        let (mut engine, _) = engine_with(vec![single_raw("e1", "financas", vec![10, -5])]);
        let mut character = Character::new("Ada");

        let outcome = engine
            .process_event(&mut character, &mut FixedChoice(0))
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::Applied {
                event_id: "e1".to_string(),
                choice: 0
            }
        );
        assert_eq!(character.finances(), 10);
    }

    #[test]
    fn test_single_effect_option_one() {
        let (mut engine, _) = engine_with(vec![single_raw("e1", "financas", vec![10, -5])]);
        let mut character = Character::new("Ada");

        engine
            .process_event(&mut character, &mut FixedChoice(1))
            .unwrap();
        assert_eq!(character.finances(), -5);
    }

    #[test]
    fn test_multi_effect_ignores_choice() {
        let mut multi = HashMap::new();
        multi.insert("felicidade".to_string(), 5);
        multi.insert("carisma".to_string(), 3);
        let raw = RawEvent {
            id: "m1".to_string(),
            descricao: "A big party.".to_string(),
            opcoes: vec!["Go".to_string(), "Stay home".to_string()],
            efeitos: None,
            atributo: None,
            efeitos_multiplos: Some(multi),
        };
        let (mut engine, _) = engine_with(vec![raw]);
        let mut character = Character::new("Ada");

        engine
            .process_event(&mut character, &mut FixedChoice(1))
            .unwrap();
        assert_eq!(character.happiness(), 55);
        assert_eq!(character.charisma(), 53);
    }

    #[test]
    fn test_multi_effect_partial_application() {
        let mut multi = HashMap::new();
        multi.insert("felicidade".to_string(), 5);
        multi.insert("astral".to_string(), 40);
        let raw = RawEvent {
            id: "m2".to_string(),
            descricao: "Strange omen.".to_string(),
            opcoes: vec!["Shrug".to_string()],
            efeitos: None,
            atributo: None,
            efeitos_multiplos: Some(multi),
        };
        let (mut engine, _) = engine_with(vec![raw]);
        let mut character = Character::new("Ada");

        let outcome = engine.process_event(&mut character, &mut FixedChoice(0));
        assert!(outcome.is_ok());
        assert_eq!(character.happiness(), 55);
    }

    #[test]
    fn test_out_of_range_delta_skips_effect_but_consumes() {
        // Two options, but only one delta.
        let raw = RawEvent {
            id: "e1".to_string(),
            descricao: "Odd event.".to_string(),
            opcoes: vec!["A".to_string(), "B".to_string()],
            efeitos: Some(vec![10]),
            atributo: Some("financas".to_string()),
            efeitos_multiplos: None,
        };
        let (mut engine, _) = engine_with(vec![raw]);
        let mut character = Character::new("Ada");

        let outcome = engine
            .process_event(&mut character, &mut FixedChoice(1))
            .unwrap();
        assert!(matches!(outcome, Outcome::Applied { .. }));
        assert_eq!(character.finances(), 0);

        // The event is still consumed.
        assert!(engine
            .process_event(&mut character, &mut FixedChoice(0))
            .is_err());
    }

    #[test]
    fn test_dedup_exhausts_then_resets() {
        let raws: Vec<RawEvent> = (0..4)
            .map(|i| single_raw(&format!("e{}", i), "felicidade", vec![1]))
            .collect();
        let (mut engine, _) = engine_with(raws);
        let mut character = Character::new("Ada");
        let mut input = FixedChoice(0);

        let mut seen = Vec::new();
        for _ in 0..4 {
            match engine.process_event(&mut character, &mut input).unwrap() {
                Outcome::Applied { event_id, .. } => seen.push(event_id),
            }
        }
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 4, "each event fires at most once per phase");

        assert_eq!(
            engine.process_event(&mut character, &mut input),
            Err(NoEventsAvailable(Phase::EarlyInfancy))
        );

        engine.reset_phase(Phase::EarlyInfancy);
        for _ in 0..4 {
            assert!(engine.process_event(&mut character, &mut input).is_ok());
        }
        assert!(engine.process_event(&mut character, &mut input).is_err());
    }

    #[test]
    fn test_duplicate_ids_do_not_inflate_the_pool() {
        let raws = vec![
            single_raw("dup", "felicidade", vec![1]),
            single_raw("dup", "felicidade", vec![2]),
            single_raw("other", "felicidade", vec![1]),
        ];
        let (mut engine, _) = engine_with(raws);
        let mut character = Character::new("Ada");
        let mut input = FixedChoice(0);

        // The count promises exactly as many successes as it reports.
        assert_eq!(engine.available_count(&character), 2);
        assert!(engine.process_event(&mut character, &mut input).is_ok());
        assert!(engine.process_event(&mut character, &mut input).is_ok());
        assert_eq!(
            engine.process_event(&mut character, &mut input),
            Err(NoEventsAvailable(Phase::EarlyInfancy))
        );
    }

    #[test]
    fn test_empty_pool_reports_no_events() {
        let (mut engine, _) = engine_with(Vec::new());
        let mut character = Character::new("Ada");
        assert_eq!(
            engine.process_event(&mut character, &mut FixedChoice(0)),
            Err(NoEventsAvailable(Phase::EarlyInfancy))
        );
    }

    #[test]
    fn test_consumed_sets_are_per_phase() {
        let (mut engine, _) = engine_with(vec![single_raw("shared", "felicidade", vec![1])]);
        let mut character = Character::new("Ada");
        let mut input = FixedChoice(0);

        engine.process_event(&mut character, &mut input).unwrap();
        assert!(engine.process_event(&mut character, &mut input).is_err());

        // Same id is still available in a different phase: histories are
        // independent.
        while character.age() < 3 {
            character.age_up();
        }
        assert!(engine.process_event(&mut character, &mut input).is_ok());
    }

    #[test]
    fn test_on_age_changed_prefetches_new_phase() {
        let (engine, calls) = engine_with(vec![single_raw("e", "felicidade", vec![1])]);
        let mut character = Character::new("Ada");
        character.age_up(); // 0 -> 1, same phase
        engine.on_age_changed(&character, 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0, "same phase, no prefetch");

        while character.age() < 3 {
            character.age_up();
        }
        engine.on_age_changed(&character, 2);
        assert!(engine.repository().is_loaded(Phase::Preschool));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_on_age_changed_does_not_touch_consumed() {
        let (mut engine, _) = engine_with(vec![single_raw("e", "felicidade", vec![1])]);
        let mut character = Character::new("Ada");
        let mut input = FixedChoice(0);

        engine.process_event(&mut character, &mut input).unwrap();
        let previous = character.age();
        while character.age() < 3 {
            character.age_up();
        }
        engine.on_age_changed(&character, previous);

        // Going back to the old phase, its history is intact.
        let mut young = Character::new("Ada2");
        assert_eq!(young.age(), 0);
        assert!(engine.process_event(&mut young, &mut input).is_err());
    }

    #[test]
    fn test_available_count_tracks_consumption() {
        let raws: Vec<RawEvent> = (0..3)
            .map(|i| single_raw(&format!("e{}", i), "felicidade", vec![1]))
            .collect();
        let (mut engine, _) = engine_with(raws);
        let mut character = Character::new("Ada");

        assert_eq!(engine.available_count(&character), 3);
        engine
            .process_event(&mut character, &mut FixedChoice(0))
            .unwrap();
        assert_eq!(engine.available_count(&character), 2);
    }
}
