//! # OptimizerOptions
//!
//! The `OptimizerOptions` struct holds the configuration of an optimization
//! run: how many generations to run, how large each population is, how the
//! mutation rate decays, the tournament size and how much to log.
//!
//! ## Example
//!
//! ```rust
//! use classched::evolution::options::{LogLevel, OptimizerOptions};
//!
//! let options = OptimizerOptions::builder()
//!     .num_generations(200)
//!     .population_size(30)
//!     .mutation_rate(0.2)
//!     .log_level(LogLevel::Minimal)
//!     .build();
//!
//! assert_eq!(options.get_num_generations(), 200);
//! assert!(options.validate().is_ok());
//!
//! // Defaults: 100 generations, population of 50, mutation rate 0.1
//! let default_options = OptimizerOptions::default();
//! assert_eq!(default_options.get_population_size(), 50);
//! ```
//!
//! ## LogLevel
//!
//! - `Verbose`: one `info!` event per generation plus a `debug!` event with
//!   the mutation rate and every score.
//! - `Minimal`: one `info!` event per generation.
//! - `None`: no per-generation events. Skipped generations are still
//!   reported at `warn!`.

use crate::error::{Result, ScheduleError};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Verbose,
    Minimal,
    None,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerOptions {
    num_generations: usize,
    population_size: usize,
    /// Starting mutation rate; decays linearly over the run.
    mutation_rate: f64,
    /// Floor of the decayed mutation rate.
    min_mutation_rate: f64,
    tournament_size: usize,
    log_level: LogLevel,
    /// Minimum population size scored in parallel
    parallel_threshold: usize,
}

impl OptimizerOptions {
    pub fn new(
        num_generations: usize,
        population_size: usize,
        mutation_rate: f64,
        log_level: LogLevel,
    ) -> Self {
        Self {
            num_generations,
            population_size,
            mutation_rate,
            log_level,
            ..Self::default()
        }
    }

    pub fn get_num_generations(&self) -> usize {
        self.num_generations
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn get_min_mutation_rate(&self) -> f64 {
        self.min_mutation_rate
    }

    pub fn get_tournament_size(&self) -> usize {
        self.tournament_size
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Returns the minimum population size scored in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn set_num_generations(&mut self, num_generations: usize) {
        self.num_generations = num_generations;
    }

    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    pub fn set_mutation_rate(&mut self, mutation_rate: f64) {
        self.mutation_rate = mutation_rate;
    }

    pub fn set_min_mutation_rate(&mut self, min_mutation_rate: f64) {
        self.min_mutation_rate = min_mutation_rate;
    }

    pub fn set_tournament_size(&mut self, tournament_size: usize) {
        self.tournament_size = tournament_size;
    }

    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    /// Mutation rate for a generation: the starting rate decayed linearly
    /// towards zero over the run, never below the configured floor.
    pub fn mutation_rate_at(&self, generation: usize) -> f64 {
        let progress = if self.num_generations == 0 {
            1.0
        } else {
            generation as f64 / self.num_generations as f64
        };
        (self.mutation_rate * (1.0 - progress)).max(self.min_mutation_rate)
    }

    /// Checks the options before a run.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the generation count, population
    /// size or tournament size is zero, or if a mutation rate lies outside
    /// `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.num_generations == 0 {
            return Err(ScheduleError::Configuration(
                "Number of generations cannot be zero".to_string(),
            ));
        }
        if self.population_size == 0 {
            return Err(ScheduleError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(ScheduleError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        for (name, rate) in [
            ("Mutation rate", self.mutation_rate),
            ("Minimum mutation rate", self.min_mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ScheduleError::Configuration(format!(
                    "{} must be within [0, 1], got {}",
                    name, rate
                )));
            }
        }
        Ok(())
    }

    /// Returns a builder for creating an `OptimizerOptions` instance.
    pub fn builder() -> OptimizerOptionsBuilder {
        OptimizerOptionsBuilder::default()
    }
}

impl Default for OptimizerOptions {
    fn default() -> Self {
        Self {
            num_generations: 100,
            population_size: 50,
            mutation_rate: 0.1,
            min_mutation_rate: 0.01,
            tournament_size: 3,
            log_level: LogLevel::None,
            parallel_threshold: 1000,
        }
    }
}

/// Builder for `OptimizerOptions`.
#[derive(Debug, Clone, Default)]
pub struct OptimizerOptionsBuilder {
    num_generations: Option<usize>,
    population_size: Option<usize>,
    mutation_rate: Option<f64>,
    min_mutation_rate: Option<f64>,
    tournament_size: Option<usize>,
    log_level: Option<LogLevel>,
    parallel_threshold: Option<usize>,
}

impl OptimizerOptionsBuilder {
    pub fn num_generations(mut self, value: usize) -> Self {
        self.num_generations = Some(value);
        self
    }

    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }

    pub fn min_mutation_rate(mut self, value: f64) -> Self {
        self.min_mutation_rate = Some(value);
        self
    }

    pub fn tournament_size(mut self, value: usize) -> Self {
        self.tournament_size = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Builds the `OptimizerOptions` instance. Unset fields take the
    /// defaults.
    pub fn build(self) -> OptimizerOptions {
        let defaults = OptimizerOptions::default();
        OptimizerOptions {
            num_generations: self.num_generations.unwrap_or(defaults.num_generations),
            population_size: self.population_size.unwrap_or(defaults.population_size),
            mutation_rate: self.mutation_rate.unwrap_or(defaults.mutation_rate),
            min_mutation_rate: self.min_mutation_rate.unwrap_or(defaults.min_mutation_rate),
            tournament_size: self.tournament_size.unwrap_or(defaults.tournament_size),
            log_level: self.log_level.unwrap_or(defaults.log_level),
            parallel_threshold: self.parallel_threshold.unwrap_or(defaults.parallel_threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = OptimizerOptions::default();
        assert_eq!(options.get_num_generations(), 100);
        assert_eq!(options.get_population_size(), 50);
        assert_eq!(options.get_mutation_rate(), 0.1);
        assert_eq!(options.get_min_mutation_rate(), 0.01);
        assert_eq!(options.get_tournament_size(), 3);
        assert_eq!(options.get_log_level(), LogLevel::None);
        assert_eq!(options.get_parallel_threshold(), 1000);
        assert_eq!(OptimizerOptions::builder().build(), options);
    }

    #[test]
    fn test_new_keeps_remaining_defaults() {
        let options = OptimizerOptions::new(10, 5, 0.3, LogLevel::Verbose);
        assert_eq!(options.get_num_generations(), 10);
        assert_eq!(options.get_population_size(), 5);
        assert_eq!(options.get_mutation_rate(), 0.3);
        assert_eq!(options.get_log_level(), LogLevel::Verbose);
        assert_eq!(options.get_tournament_size(), 3);
    }

    #[test]
    fn test_mutation_rate_decay() {
        let options = OptimizerOptions::default();
        assert!((options.mutation_rate_at(0) - 0.1).abs() < 1e-12);
        assert!((options.mutation_rate_at(50) - 0.05).abs() < 1e-12);
        // Floor reached near the end of the run
        assert_eq!(options.mutation_rate_at(95), 0.01);
        assert_eq!(options.mutation_rate_at(100), 0.01);
        assert_eq!(options.mutation_rate_at(500), 0.01);
    }

    #[test]
    fn test_validate() {
        assert!(OptimizerOptions::default().validate().is_ok());

        let mut options = OptimizerOptions::default();
        options.set_population_size(0);
        assert!(matches!(
            options.validate(),
            Err(ScheduleError::Configuration(msg)) if msg.contains("Population size")
        ));

        let options = OptimizerOptions::builder().num_generations(0).build();
        assert!(options.validate().is_err());

        let options = OptimizerOptions::builder().tournament_size(0).build();
        assert!(options.validate().is_err());

        let options = OptimizerOptions::builder().mutation_rate(1.5).build();
        assert!(options.validate().is_err());

        let options = OptimizerOptions::builder().min_mutation_rate(-0.1).build();
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_setters() {
        let mut options = OptimizerOptions::default();
        options.set_num_generations(7);
        options.set_mutation_rate(0.4);
        options.set_min_mutation_rate(0.0);
        options.set_tournament_size(2);
        options.set_log_level(LogLevel::Minimal);
        options.set_parallel_threshold(4);

        assert_eq!(options.get_num_generations(), 7);
        assert_eq!(options.get_mutation_rate(), 0.4);
        assert_eq!(options.get_min_mutation_rate(), 0.0);
        assert_eq!(options.get_tournament_size(), 2);
        assert_eq!(options.get_log_level(), LogLevel::Minimal);
        assert_eq!(options.get_parallel_threshold(), 4);
    }
}
