//! Random input arrays for the reduction benchmarks.

use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::error::{BenchError, Result};

/// Exclusive upper bound of generated values; the range is `[0, 9999)`.
pub const VALUE_UPPER_BOUND: i32 = 9_999;

static PROCESS_SEED: OnceLock<u64> = OnceLock::new();

/// Seed derived from the wall clock on first use and fixed for the rest of
/// the process.
pub fn process_seed() -> u64 {
    *PROCESS_SEED.get_or_init(|| {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or(0);
        debug!(seed, "derived process seed from wall clock");
        seed
    })
}

/// Produces arrays of uniformly distributed integers in `[0, 9999)`.
///
/// The RNG is seeded once at construction; successive [`generate`] calls
/// continue the same stream.
///
/// [`generate`]: ArrayGenerator::generate
pub struct ArrayGenerator {
    rng: ChaCha8Rng,
    seed: u64,
}

impl ArrayGenerator {
    /// Creates a generator from `seed`, or from [`process_seed`] when `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(process_seed);
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this generator was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns `len` fresh values, or `InvalidInput` when the array cannot
    /// be allocated.
    pub fn generate(&mut self, len: usize) -> Result<Vec<i32>> {
        let mut values = Vec::new();
        values
            .try_reserve_exact(len)
            .map_err(|_| BenchError::InvalidInput(format!("cannot allocate {len} elements")))?;
        values.extend((0..len).map(|_| self.rng.gen_range(0..VALUE_UPPER_BOUND)));
        debug!(len, seed = self.seed, "generated input array");
        Ok(values)
    }
}

impl Default for ArrayGenerator {
    fn default() -> Self {
        Self::new(None)
    }
}
