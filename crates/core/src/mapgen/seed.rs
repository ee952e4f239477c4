//! Seeded random source shared by every generation phase, plus seed resolution helpers.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

/// Configured seed value meaning "pick one at runtime".
pub const RANDOM_SEED_SENTINEL: u64 = 0;

/// Bounded integer draws over a ChaCha stream. Identical seeds yield identical draw sequences.
#[derive(Clone, Debug)]
pub struct RandomSource {
    rng: ChaCha8Rng,
}

impl RandomSource {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Uniform draw in `[min, max_exclusive)`. An empty range yields `min`.
    pub fn range(&mut self, min: i32, max_exclusive: i32) -> i32 {
        if max_exclusive <= min {
            return min;
        }
        let span = (i64::from(max_exclusive) - i64::from(min)) as u64;
        (i64::from(min) + (self.rng.next_u64() % span) as i64) as i32
    }

    /// Uniform draw in `[0, upper)`. Returns 0 when `upper` is 0.
    pub fn below(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        (self.rng.next_u64() % upper as u64) as usize
    }

    /// Uniform draw in `[min, max]`; a reversed range collapses to `min`.
    pub fn inclusive(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        let span = u64::from(max - min) + 1;
        min + (self.rng.next_u64() % span) as u32
    }

    /// Percentile roll that succeeds on `> 50`, i.e. 49 times out of 100.
    pub fn coin_over_fifty(&mut self) -> bool {
        self.below(100) > 50
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.below(items.len()))
    }

    pub fn pick_and_remove<T>(&mut self, items: &mut Vec<T>) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        let index = self.below(items.len());
        Some(items.remove(index))
    }
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Returns `configured` unless it is the sentinel, in which case a fresh runtime seed is drawn.
pub fn resolve_seed(configured: u64) -> u64 {
    if configured != RANDOM_SEED_SENTINEL {
        return configured;
    }
    let mut seed = generate_runtime_seed();
    while seed == RANDOM_SEED_SENTINEL {
        seed = generate_runtime_seed();
    }
    seed
}

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    mix_seed(entropy)
}

pub(crate) fn mix_seed(value: u64) -> u64 {
    let mut mixed = value ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}
