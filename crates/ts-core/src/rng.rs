//! Deterministic per-run RNG.
//!
//! # Determinism strategy
//!
//! Every simulation run owns exactly one `RunRng`.  The engine passes it by
//! `&mut` to the arrival and service-time generators, so a run's random
//! stream depends only on its own seed and the order of draws inside the
//! tick loop.  There is no process-wide generator.
//!
//! When an experiment has a root seed but a scenario has none, the scenario
//! seed is derived by:
//!
//!   seed = root_seed XOR (run_index * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive run indices uniformly across the seed space.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// The random source owned by one simulation run.
///
/// Not `Clone`: two engines must never share (or silently duplicate) a stream.
#[derive(Debug)]
pub struct RunRng(SmallRng);

impl RunRng {
    /// Seed deterministically.
    pub fn new(seed: u64) -> Self {
        RunRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from OS entropy (non-reproducible).
    pub fn from_entropy() -> Self {
        RunRng(SmallRng::from_entropy())
    }

    /// `new(seed)` when a seed is given, `from_entropy()` otherwise.
    pub fn from_seed_opt(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::new(s),
            None => Self::from_entropy(),
        }
    }

    /// Seed for run number `index` of an experiment rooted at `root_seed`.
    #[inline]
    pub fn derive_seed(root_seed: u64, index: u64) -> u64 {
        root_seed ^ index.wrapping_mul(MIXING_CONSTANT)
    }

    /// Deterministic RNG for run number `index` of an experiment.
    pub fn for_run(root_seed: u64, index: u64) -> Self {
        Self::new(Self::derive_seed(root_seed, index))
    }

    /// Expose the inner `SmallRng` for use with `rand` / `rand_distr`
    /// distribution types (`rng.inner().sample(...)`).
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    /// For `f64` the range is `[0, 1)`.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// A uniform draw from the open interval `(0, 1)`.
    ///
    /// Zero is resampled so `ln(u)` is always finite.
    pub fn open_unit(&mut self) -> f64 {
        loop {
            let u: f64 = self.0.r#gen();
            if u > 0.0 {
                return u;
            }
        }
    }
}
