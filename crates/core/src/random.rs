//! Pseudo-random draws consumed by world generators.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Deterministic random source.
///
/// Every draw advances the generator, so two sources with the same state
/// produce the same sequence of answers for the same sequence of calls.
pub trait RandomSource {
    /// Uniform boolean draw.
    fn next_bool(&mut self) -> bool;

    /// Uniform integer draw in `lo..=hi`.
    fn next_range(&mut self, lo: i32, hi: i32) -> i32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_bool(&mut self) -> bool {
        (**self).next_bool()
    }

    fn next_range(&mut self, lo: i32, hi: i32) -> i32 {
        (**self).next_range(lo, hi)
    }
}

/// Seeded [`RandomSource`] backed by [`StdRng`].
#[derive(Debug, Clone)]
pub struct WorldRandom {
    rng: StdRng,
}

impl WorldRandom {
    /// Create a source seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for WorldRandom {
    fn next_bool(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    fn next_range(&mut self, lo: i32, hi: i32) -> i32 {
        debug_assert!(lo <= hi, "empty range {lo}..={hi}");
        self.rng.gen_range(lo..=hi)
    }
}
