//! Round state and judging
//!
//! The controller owns the only mutable quiz state. Presentation code reads
//! `Arc<Round>` snapshots and reports hits; it never owns the counters.

use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::distribution::Distribution;
use super::equation::Equation;
use super::generator::ProblemGenerator;
use super::operation::Operation;
use crate::consts::DEFAULT_LIVES;
use crate::settings::GameSettings;

/// One equation and its block values. Replaced, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Increments with every generated round (first round is 1)
    pub id: u64,
    pub equation: Equation,
    pub distribution: Distribution,
}

impl Round {
    pub fn equation_text(&self) -> String {
        self.equation.text()
    }

    pub fn slot_values(&self) -> &[u32] {
        &self.distribution.slot_values
    }

    pub fn correct_index(&self) -> usize {
        self.distribution.correct_index
    }
}

/// Notifications for the presentation layer, drained after each input
#[derive(Debug, Clone, PartialEq)]
pub enum RoundEvent {
    /// A new round replaced the previous one; re-render equation and blocks
    EquationChanged(Arc<Round>),
    /// A block hit was judged (a wrong hit leaves the round in place)
    HitJudged { slot: usize, correct: bool },
    LivesChanged { lives: u8 },
    /// Lives reached zero
    OutOfLives,
    /// Counters were reset for a new game
    Reset { lives: u8 },
}

/// Counter snapshot for stats boards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    pub correct: u32,
    pub wrong: u32,
    pub lives: u8,
}

/// Mutable session state, owned by [`RoundController`]
#[derive(Debug, Clone)]
pub struct RoundState {
    /// `None` until the first round is started
    pub current: Option<Arc<Round>>,
    pub correct_count: u32,
    pub wrong_count: u32,
    pub lives_remaining: u8,
}

impl Default for RoundState {
    fn default() -> Self {
        Self {
            current: None,
            correct_count: 0,
            wrong_count: 0,
            lives_remaining: DEFAULT_LIVES,
        }
    }
}

/// Session-scoped orchestration between the generator and the host
#[derive(Debug, Clone)]
pub struct RoundController {
    generator: ProblemGenerator,
    /// Seed the RNG was created from, kept for replays
    seed: u64,
    rng: Pcg32,
    state: RoundState,
    rounds_generated: u64,
    events: Vec<RoundEvent>,
}

impl Default for RoundController {
    fn default() -> Self {
        Self::new(rand::rng().random())
    }
}

impl RoundController {
    /// Create a controller with the default configuration and the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            generator: ProblemGenerator::default(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            state: RoundState::default(),
            rounds_generated: 0,
            events: Vec::new(),
        }
    }

    /// Create a controller from game settings (random seed if none is set)
    pub fn from_settings(settings: &GameSettings) -> Self {
        let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
        let mut controller = Self::new(seed);
        controller.configure(settings.operation, settings.max_result);
        controller.set_slot_count(settings.slot_count);
        controller.state.lives_remaining = settings.lives;
        controller
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn generator(&self) -> &ProblemGenerator {
        &self.generator
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// Set operation and result limit for the next rounds.
    ///
    /// Does not generate a round.
    pub fn configure(&mut self, operation: Operation, max_result: u32) {
        self.generator.operation = operation;
        self.generator.max_result = max_result;
        log::info!("Configured {} up to {}", operation.as_str(), max_result);
        if self.generator.is_degenerate() {
            log::warn!(
                "max_result {} is below {} for {}; rounds may exceed it or repeat values",
                max_result,
                ProblemGenerator::min_max_result(operation),
                operation.as_str()
            );
        }
    }

    /// [`configure`](Self::configure) from a settings tag; unknown tags use the fallback
    pub fn configure_tag(&mut self, operation: &str, max_result: u32) {
        self.configure(Operation::from_tag(operation), max_result);
    }

    /// Number of blocks the host shows (clamped at generation time)
    pub fn set_slot_count(&mut self, slot_count: usize) {
        self.generator.slot_count = slot_count;
    }

    /// Generate and install a new round. Counters are untouched.
    pub fn start_round(&mut self) -> Arc<Round> {
        let problem = self.generator.generate(&mut self.rng);
        self.rounds_generated += 1;
        let round = Arc::new(Round {
            id: self.rounds_generated,
            equation: problem.equation,
            distribution: problem.distribution,
        });
        self.state.current = Some(Arc::clone(&round));
        self.events.push(RoundEvent::EquationChanged(Arc::clone(&round)));
        round
    }

    /// Judge a block hit.
    ///
    /// A missing or out-of-range slot is ignored and returns `false`. A correct
    /// hit advances to a new round; a wrong hit keeps the current one.
    pub fn handle_hit(&mut self, slot: Option<usize>) -> bool {
        let Some(slot) = slot else {
            return false;
        };
        let Some(round) = self.state.current.as_ref() else {
            return false;
        };
        if slot >= round.distribution.slot_count() {
            log::debug!("Ignoring hit on missing slot {}", slot);
            return false;
        }

        let correct = round.distribution.is_correct(slot);
        log::debug!("Round {}: slot {} hit, correct={}", round.id, slot, correct);
        self.events.push(RoundEvent::HitJudged { slot, correct });

        if correct {
            self.state.correct_count += 1;
            self.start_round();
        } else {
            self.state.wrong_count += 1;
        }
        correct
    }

    /// Start a new game: zero the counters and set the lives.
    ///
    /// The current round is kept until [`start_round`](Self::start_round) is called.
    pub fn reset(&mut self, lives: u8) {
        self.state.correct_count = 0;
        self.state.wrong_count = 0;
        self.state.lives_remaining = lives;
        self.events.push(RoundEvent::Reset { lives });
        log::info!("Game reset with {} lives", lives);
    }

    /// Take one life (called by the game mode on a fail state). Returns the lives left.
    pub fn lose_life(&mut self) -> u8 {
        if self.state.lives_remaining == 0 {
            return 0;
        }
        self.state.lives_remaining -= 1;
        let lives = self.state.lives_remaining;
        self.events.push(RoundEvent::LivesChanged { lives });
        if lives == 0 {
            log::info!(
                "Out of lives: {} correct, {} wrong",
                self.state.correct_count,
                self.state.wrong_count
            );
            self.events.push(RoundEvent::OutOfLives);
        }
        lives
    }

    pub fn current_round(&self) -> Option<Arc<Round>> {
        self.state.current.clone()
    }

    pub fn equation_text(&self) -> Option<String> {
        self.state.current.as_ref().map(|r| r.equation_text())
    }

    pub fn slot_values(&self) -> &[u32] {
        self.state
            .current
            .as_ref()
            .map(|r| r.slot_values())
            .unwrap_or(&[])
    }

    pub fn correct_index(&self) -> Option<usize> {
        self.state.current.as_ref().map(|r| r.correct_index())
    }

    pub fn correct_count(&self) -> u32 {
        self.state.correct_count
    }

    pub fn wrong_count(&self) -> u32 {
        self.state.wrong_count
    }

    pub fn lives_remaining(&self) -> u8 {
        self.state.lives_remaining
    }

    pub fn scoreboard(&self) -> Scoreboard {
        Scoreboard {
            correct: self.state.correct_count,
            wrong: self.state.wrong_count,
            lives: self.state.lives_remaining,
        }
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(operation: &str, max_result: u32, seed: u64) -> RoundController {
        let mut controller = RoundController::new(seed);
        controller.configure_tag(operation, max_result);
        controller.start_round();
        controller
    }

    fn wrong_slot(controller: &RoundController) -> usize {
        let correct = controller.correct_index().unwrap();
        (correct + 1) % controller.slot_values().len()
    }

    #[test]
    fn test_configure_does_not_generate() {
        let mut controller = RoundController::new(1);
        controller.configure(Operation::Division, 30);
        assert!(controller.current_round().is_none());
        assert!(controller.drain_events().is_empty());
        assert!(!controller.handle_hit(Some(0)));
    }

    #[test]
    fn test_addition_rounds_respect_limit() {
        let mut controller = started("addition", 20, 5);
        for _ in 0..500 {
            let round = controller.start_round();
            let eq = round.equation;
            assert!(eq.result <= 20);
            assert_eq!(eq.a + eq.b, eq.result);
        }
    }

    #[test]
    fn test_division_round() {
        for seed in 0..50 {
            let controller = started("division", 30, seed);
            let eq = controller.current_round().unwrap().equation;
            assert_eq!(eq.a % eq.b, 0);
            assert_eq!(eq.a / eq.b, eq.result);
        }
    }

    #[test]
    fn test_subtraction_round() {
        for seed in 0..50 {
            let controller = started("subtraction", 10, seed);
            let eq = controller.current_round().unwrap().equation;
            assert_eq!(eq.a - eq.b, eq.result);
            assert!(eq.a <= 10);
        }
    }

    #[test]
    fn test_missing_hit_is_noop() {
        let mut controller = started("addition", 20, 9);
        controller.drain_events();
        let before = controller.current_round().unwrap();

        assert!(!controller.handle_hit(None));
        assert!(!controller.handle_hit(Some(4)));
        assert!(!controller.handle_hit(Some(usize::MAX)));

        assert_eq!(controller.correct_count(), 0);
        assert_eq!(controller.wrong_count(), 0);
        assert!(Arc::ptr_eq(&before, &controller.current_round().unwrap()));
        assert!(controller.drain_events().is_empty());
    }

    #[test]
    fn test_wrong_hit_keeps_round() {
        let mut controller = started("multiplication", 50, 21);
        let before = controller.current_round().unwrap();
        let slot = wrong_slot(&controller);

        for n in 1..=5 {
            assert!(!controller.handle_hit(Some(slot)));
            assert_eq!(controller.wrong_count(), n);
            assert!(Arc::ptr_eq(&before, &controller.current_round().unwrap()));
        }
        assert_eq!(controller.correct_count(), 0);
    }

    #[test]
    fn test_correct_hit_advances() {
        let mut controller = started("addition", 20, 42);
        let mut repeats = 0;
        for n in 1..=100 {
            let before = controller.current_round().unwrap();
            let correct = controller.correct_index().unwrap();

            assert!(controller.handle_hit(Some(correct)));
            assert_eq!(controller.correct_count(), n);

            let after = controller.current_round().unwrap();
            assert!(!Arc::ptr_eq(&before, &after));
            assert_eq!(after.id, before.id + 1);
            if after.equation_text() == before.equation_text() {
                repeats += 1;
            }
        }
        assert!(repeats < 10, "{} repeated equations in 100 rounds", repeats);
        assert_eq!(controller.wrong_count(), 0);
    }

    #[test]
    fn test_hit_events() {
        let mut controller = started("subtraction", 20, 3);
        let events = controller.drain_events();
        assert!(matches!(events.as_slice(), [RoundEvent::EquationChanged(r)] if r.id == 1));

        let slot = wrong_slot(&controller);
        controller.handle_hit(Some(slot));
        assert_eq!(
            controller.drain_events(),
            vec![RoundEvent::HitJudged { slot, correct: false }]
        );

        let correct = controller.correct_index().unwrap();
        controller.handle_hit(Some(correct));
        let events = controller.drain_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], RoundEvent::HitJudged { slot: correct, correct: true });
        assert!(matches!(&events[1], RoundEvent::EquationChanged(r) if r.id == 2));
    }

    #[test]
    fn test_lives_run_out() {
        let mut controller = RoundController::new(8);
        assert_eq!(controller.lives_remaining(), DEFAULT_LIVES);

        assert_eq!(controller.lose_life(), 2);
        assert_eq!(controller.lose_life(), 1);
        assert_eq!(controller.lose_life(), 0);
        assert_eq!(controller.lose_life(), 0);

        assert_eq!(
            controller.drain_events(),
            vec![
                RoundEvent::LivesChanged { lives: 2 },
                RoundEvent::LivesChanged { lives: 1 },
                RoundEvent::LivesChanged { lives: 0 },
                RoundEvent::OutOfLives,
            ]
        );
    }

    #[test]
    fn test_reset_keeps_round() {
        let mut controller = started("division", 30, 12);
        let slot = wrong_slot(&controller);
        controller.handle_hit(Some(slot));
        controller.lose_life();
        let round = controller.current_round().unwrap();
        controller.drain_events();

        controller.reset(5);
        assert_eq!(
            controller.scoreboard(),
            Scoreboard {
                correct: 0,
                wrong: 0,
                lives: 5
            }
        );
        assert!(Arc::ptr_eq(&round, &controller.current_round().unwrap()));
        assert_eq!(controller.drain_events(), vec![RoundEvent::Reset { lives: 5 }]);
    }

    #[test]
    fn test_fewer_blocks() {
        let mut controller = RoundController::new(4);
        controller.set_slot_count(2);
        let round = controller.start_round();
        assert_eq!(round.slot_values().len(), 2);
        assert!(round.correct_index() < 2);
        assert!(!controller.handle_hit(Some(2)));
        assert_eq!(controller.wrong_count(), 0);
    }

    #[test]
    fn test_unknown_operation_falls_back() {
        let controller = started("modulo", 20, 6);
        assert_eq!(controller.generator().operation, Operation::Fallback);
        let round = controller.current_round().unwrap();
        assert!(round.equation_text().contains(" + "));
        assert!(round.equation.is_consistent());
    }

    #[test]
    fn test_from_settings() {
        let settings = GameSettings {
            operation: Operation::Multiplication,
            max_result: 50,
            slot_count: 3,
            lives: 4,
            seed: Some(77),
        };
        let mut controller = RoundController::from_settings(&settings);
        assert_eq!(controller.seed(), 77);
        assert_eq!(controller.lives_remaining(), 4);
        let round = controller.start_round();
        assert_eq!(round.slot_values().len(), 3);
        assert_eq!(round.equation.operation, Operation::Multiplication);
    }

    #[test]
    fn test_determinism() {
        let mut c1 = started("multiplication", 100, 99999);
        let mut c2 = started("multiplication", 100, 99999);
        for _ in 0..20 {
            let slot = c1.correct_index();
            assert_eq!(c1.handle_hit(slot), c2.handle_hit(slot));
            assert_eq!(c1.current_round(), c2.current_round());
        }
    }
}
