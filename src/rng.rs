//! Injectable randomness source
//!
//! The engines never reach for a global RNG; a `RandomSource` is injected
//! through their constructors so selection and interaction outcomes are
//! deterministic and replayable in tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Narrow randomness contract consumed by the engines.
pub trait RandomSource {
    /// Generate a number in `[min, max]`, inclusive on both ends.
    fn uniform(&mut self, min: i32, max: i32) -> i32;

    /// Roll a percent chance in `[0, 100]`.
    fn chance(&mut self, percent: i32) -> bool {
        if percent <= 0 {
            return false;
        }
        if percent >= 100 {
            return true;
        }
        self.uniform(0, 99) < percent
    }
}

/// Default `RandomSource` backed by a seedable [`StdRng`].
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Create a source seeded from system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a deterministic source from a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for StdRandom {
    fn uniform(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(min <= max, "uniform called with min > max");
        self.rng.gen_range(min..=max)
    }
}
