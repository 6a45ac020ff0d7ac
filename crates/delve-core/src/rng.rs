//! Random number generation for dungeon layouts
//!
//! Uses a seeded ChaCha RNG so a seed fully determines a layout.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded random source threaded through every generation stage
///
/// A layout is a function of the seed and the order of draws, so the same
/// seed replays the same dungeon. Serialized form is the bare seed; a
/// deserialized RNG starts over from its first draw.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub struct DungeonRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl From<u64> for DungeonRng {
    fn from(seed: u64) -> Self {
        Self::new(seed)
    }
}

impl From<DungeonRng> for u64 {
    fn from(rng: DungeonRng) -> Self {
        rng.seed
    }
}

impl DungeonRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Pick a fresh seed from the thread RNG, for runs without `--seed`
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seed this stream started from, unaffected by draws
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform draw in `[0, 1)`
    pub fn uniform(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }

    /// Uniform integer in `[0, n)`
    ///
    /// Returns 0 if n is 0.
    pub fn below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Uniform integer in the half-open range `[lo, hi)`
    ///
    /// Returns `lo` when the range is empty.
    pub fn range(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }

    /// Fair coin flip
    pub fn coin(&mut self) -> bool {
        self.below(2) == 0
    }
}
