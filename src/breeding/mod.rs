//! # Breeding
//!
//! Crossover and mutation for `ScheduleGrid`. Both operators read their
//! inputs and allocate a fresh grid, and neither can split a multi-slot
//! class: contiguity is kept by construction rather than repaired later.
//!
//! ## Example
//!
//! ```rust
//! use classched::breeding::{crossover_at, mutate};
//! use classched::rng::RandomNumberGenerator;
//! use classched::schedule::{ClassTag, ScheduleGrid};
//!
//! let free = vec![true; 4];
//! let mut a = ScheduleGrid::empty(1, 4);
//! a.place(0, 0, &ClassTag::new("P1", 2), &free);
//! let mut b = ScheduleGrid::empty(1, 4);
//! b.place(0, 2, &ClassTag::new("P2", 1), &free);
//!
//! let child = crossover_at(&a, &b, 1);
//! assert!(child.is_contiguous());
//!
//! let mut rng = RandomNumberGenerator::from_seed(9);
//! assert!(mutate(&child, 1.0, &mut rng).is_contiguous());
//! ```
pub mod crossover;
pub mod mutation;

pub use crossover::{crossover, crossover_at};
pub use mutation::mutate;

use crate::{phenotype::Phenotype, rng::RandomNumberGenerator, schedule::ScheduleGrid};

impl Phenotype for ScheduleGrid {
    fn crossover(&self, other: &Self, rng: &mut RandomNumberGenerator) -> Self {
        crossover::crossover(self, other, rng)
    }

    fn mutate(&self, mutation_rate: f64, rng: &mut RandomNumberGenerator) -> Self {
        mutation::mutate(self, mutation_rate, rng)
    }
}
