pub mod challenge;
pub mod engine;
pub mod launcher;
pub mod options;
pub mod state;

pub use challenge::Challenge;
pub use engine::EvolutionEngine;
pub use launcher::{
    GenerationObserver, GenerationOutcome, GenerationReport, OptimizationResult, Optimizer,
    OptimizerPhase, StopHandle, TerminationReason,
};
pub use options::{LogLevel, OptimizerOptions, OptimizerOptionsBuilder};
pub use state::EvolutionState;
