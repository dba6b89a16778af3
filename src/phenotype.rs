//! # Phenotype Trait
//!
//! The `Phenotype` trait defines the interface for types that represent
//! individuals in the evolutionary loop. Both operators read their inputs
//! and allocate a fresh individual, so a scored parent is never modified.
//!
//! ## Example
//!
//! ```rust
//! use classched::phenotype::Phenotype;
//! use classched::rng::RandomNumberGenerator;
//!
//! #[derive(Clone, Debug)]
//! struct Knob {
//!     value: f64,
//! }
//!
//! impl Phenotype for Knob {
//!     fn crossover(&self, other: &Self, _rng: &mut RandomNumberGenerator) -> Self {
//!         Knob { value: (self.value + other.value) / 2.0 }
//!     }
//!
//!     fn mutate(&self, mutation_rate: f64, rng: &mut RandomNumberGenerator) -> Self {
//!         let mut next = self.clone();
//!         if rng.gen_chance(mutation_rate) {
//!             next.value += 0.1;
//!         }
//!         next
//!     }
//! }
//!
//! let mut rng = RandomNumberGenerator::from_seed(1);
//! let child = Knob { value: 1.0 }.crossover(&Knob { value: 3.0 }, &mut rng);
//! assert_eq!(child.value, 2.0);
//! ```

use std::fmt::Debug;

use crate::rng::RandomNumberGenerator;

/// Trait for types that represent individuals in an evolutionary algorithm.
///
/// Types implementing this trait must also implement `Clone`, `Debug`, `Send`
/// and `Sync` so that populations can be scored in parallel.
pub trait Phenotype: Clone + Debug + Send + Sync {
    /// Combines `self` with `other` into a new child.
    fn crossover(&self, other: &Self, rng: &mut RandomNumberGenerator) -> Self;

    /// Returns a perturbed copy of `self`. `mutation_rate` is the
    /// per-gene probability of a change.
    fn mutate(&self, mutation_rate: f64, rng: &mut RandomNumberGenerator) -> Self;
}
