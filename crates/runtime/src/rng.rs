//! Operating-system seeded random source.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use battle_core::BattleRng;

/// [`BattleRng`] backed by `rand`'s standard generator.
///
/// Used when no seed is configured, so every battle plays out differently.
#[derive(Clone, Debug)]
pub struct EntropyRng(StdRng);

impl EntropyRng {
    pub fn new() -> Self {
        Self(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for EntropyRng {
    fn default() -> Self {
        Self::new()
    }
}

impl BattleRng for EntropyRng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.0.gen_range(0..bound)
    }
}
