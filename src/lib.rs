pub mod breeding;
pub mod environment;
pub mod error;
pub mod evolution;
pub mod fitness;
pub mod phenotype;
pub mod rng;
pub mod schedule;
pub mod selection;

// Re-export commonly used types for convenience
pub use error::{OptionExt, Result, ScheduleError};
pub use evolution::{Challenge, EvolutionEngine, Optimizer, OptimizerOptions};
pub use fitness::{evaluate, FitnessEvaluator};
pub use phenotype::Phenotype;
pub use schedule::{ClassTag, ScheduleGrid, SlotRole};
