//! # RandomNumberGenerator
//!
//! Every operator in the engine draws from an explicitly passed
//! `RandomNumberGenerator` instead of a global source, so a whole run can be
//! replayed from a seed.
//!
//! ## Example
//!
//! ```rust
//! use classched::rng::RandomNumberGenerator;
//!
//! let mut a = RandomNumberGenerator::from_seed(7);
//! let mut b = RandomNumberGenerator::from_seed(7);
//!
//! assert_eq!(a.gen_index(10), b.gen_index(10));
//! assert_eq!(a.fetch_uniform(0.0, 1.0, 3), b.fetch_uniform(0.0, 1.0, 3));
//! ```

use rand::{rngs::StdRng, seq::index, Rng, SeedableRng};
use std::collections::VecDeque;

/// A wrapper around the `rand` crate's `StdRng` that provides the draws the
/// genetic operators need.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates `num` random floating-point numbers in `[from, to)`.
    pub fn fetch_uniform(&mut self, from: f32, to: f32, num: usize) -> VecDeque<f32> {
        let mut uniform_numbers = VecDeque::with_capacity(num);
        uniform_numbers.extend((0..num).map(|_| self.rng.gen_range(from..to)));
        uniform_numbers
    }

    /// Returns a uniformly distributed index in `[0, upper)`.
    ///
    /// `upper` must be non-zero.
    pub fn gen_index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }

    /// Returns `true` with the given probability. The probability is clamped
    /// to `[0, 1]`; NaN counts as zero.
    pub fn gen_chance(&mut self, probability: f64) -> bool {
        let p = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        self.rng.gen_bool(p)
    }

    /// Returns a uniformly distributed value in `[from, to)`.
    pub fn gen_range_f64(&mut self, from: f64, to: f64) -> f64 {
        self.rng.gen_range(from..to)
    }

    /// Samples `amount` distinct indices from `0..length` without replacement.
    ///
    /// `amount` is capped at `length`.
    pub fn sample_distinct(&mut self, length: usize, amount: usize) -> Vec<usize> {
        index::sample(&mut self.rng, length, amount.min(length)).into_vec()
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
