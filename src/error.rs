//! # Error Types
//!
//! This module defines the error type shared by the scheduling engine. Most
//! precondition violations inside the genetic operators fall back to a safe
//! value instead of failing; the variants here are what surfaces at the
//! configuration boundary and inside a single generation of the optimizer.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use classched::error::{Result, ScheduleError};
//!
//! fn check_population(size: usize) -> Result<()> {
//!     if size == 0 {
//!         return Err(ScheduleError::Configuration(
//!             "Population size cannot be zero".to_string(),
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_population(0).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use classched::error::{OptionExt, ScheduleError};
//!
//! fn best_score(scores: &[f64]) -> classched::error::Result<f64> {
//!     scores
//!         .iter()
//!         .copied()
//!         .reduce(f64::max)
//!         .ok_or_else_schedule(|| ScheduleError::EmptyPopulation)
//! }
//!
//! assert_eq!(best_score(&[1.0, 3.0, 2.0]).unwrap(), 3.0);
//! ```

use thiserror::Error;

/// Represents errors that can occur while building or evolving schedules.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when a fitness calculation yields an unusable value.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// Error that occurs when producing the next generation fails.
    #[error("Evolution error: {0}")]
    Evolution(String),

    /// Error that occurs when grids or tables disagree on their shape.
    #[error("Dimension mismatch: expected {expected_students}x{expected_slots}, found {found_students}x{found_slots}")]
    DimensionMismatch {
        expected_students: usize,
        expected_slots: usize,
        found_students: usize,
        found_slots: usize,
    },

    /// Error that occurs when a multi-slot class is split or truncated.
    #[error("Broken class block for student {student} at slot {slot}")]
    BrokenClassBlock { student: usize, slot: usize },
}

/// A specialized Result type for scheduling operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, ScheduleError>` using
    /// a closure to generate the error.
    fn ok_or_else_schedule<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> ScheduleError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_schedule<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> ScheduleError,
    {
        self.ok_or_else(err_fn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ScheduleError::BrokenClassBlock {
            student: 2,
            slot: 7,
        };
        assert_eq!(err.to_string(), "Broken class block for student 2 at slot 7");

        let err = ScheduleError::DimensionMismatch {
            expected_students: 5,
            expected_slots: 8,
            found_students: 4,
            found_slots: 8,
        };
        assert!(err.to_string().contains("expected 5x8, found 4x8"));
    }

    #[test]
    fn test_option_ext() {
        let some: Option<u8> = Some(3);
        assert_eq!(some.ok_or_else_schedule(|| ScheduleError::EmptyPopulation), Ok(3));

        let none: Option<u8> = None;
        assert_eq!(
            none.ok_or_else_schedule(|| ScheduleError::EmptyPopulation),
            Err(ScheduleError::EmptyPopulation)
        );
    }
}
