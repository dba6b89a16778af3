use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use super::{
    challenge::Challenge,
    engine::{elite_index, EvolutionEngine},
    options::{LogLevel, OptimizerOptions},
    state::EvolutionState,
};
use crate::{
    error::{Result, ScheduleError},
    phenotype::Phenotype,
    rng::RandomNumberGenerator,
    selection::{SelectionStrategy, TournamentSelection},
};

/// Cooperative stop signal, checked once per generation.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    GenerationLimit,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizerPhase {
    Running,
    Terminated(TerminationReason),
    Finalized(TerminationReason),
}

/// What the reporting side receives after every scored generation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport<P> {
    pub generation: usize,
    /// Best individual of this generation.
    pub current_best: P,
    pub current_fitness: f64,
    /// Best fitness over the whole run so far.
    pub best_fitness: f64,
    pub mutation_rate: f64,
}

/// Result of a single call to [`Optimizer::step`].
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome<P> {
    Scored(GenerationReport<P>),
    /// The generation failed; the population was kept as it was.
    Skipped {
        generation: usize,
        reason: ScheduleError,
    },
}

impl<P> GenerationOutcome<P> {
    pub fn is_scored(&self) -> bool {
        matches!(self, GenerationOutcome::Scored(_))
    }
}

/// The final result handed to the reporting side.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult<P> {
    pub best: Option<P>,
    pub best_fitness: f64,
    pub generations: usize,
    pub fitness_history: Vec<f64>,
    pub termination: TerminationReason,
}

/// Receives progress from the optimizer. Both hooks default to no-ops.
pub trait GenerationObserver<P> {
    fn on_generation(&mut self, _report: &GenerationReport<P>) {}

    fn on_finish(&mut self, _fitness_history: &[f64]) {}
}

impl<P> GenerationObserver<P> for () {}

/// Drives the evolution for a fixed number of generations or until stopped.
pub struct Optimizer<P, C, S = TournamentSelection>
where
    P: Phenotype,
    C: Challenge<P>,
    S: SelectionStrategy<P>,
{
    engine: EvolutionEngine<P, S>,
    challenge: C,
    population: Vec<P>,
    rng: RandomNumberGenerator,
    phase: OptimizerPhase,
    stop: StopHandle,
}

impl<P, C> Optimizer<P, C, TournamentSelection>
where
    P: Phenotype,
    C: Challenge<P> + Sync,
{
    /// Creates an optimizer over an initial population.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the options are invalid or the
    /// initial population does not match `population_size`, and
    /// `EmptyPopulation` if no initial individuals are given.
    pub fn new(
        options: OptimizerOptions,
        challenge: C,
        initial_population: Vec<P>,
        rng: RandomNumberGenerator,
    ) -> Result<Self> {
        let engine = EvolutionEngine::new(options)?;
        Self::with_engine(engine, challenge, initial_population, rng)
    }
}

impl<P, C, S> Optimizer<P, C, S>
where
    P: Phenotype,
    C: Challenge<P> + Sync,
    S: SelectionStrategy<P>,
{
    pub fn with_engine(
        engine: EvolutionEngine<P, S>,
        challenge: C,
        initial_population: Vec<P>,
        rng: RandomNumberGenerator,
    ) -> Result<Self> {
        if initial_population.is_empty() {
            return Err(ScheduleError::EmptyPopulation);
        }
        let population_size = engine.options().get_population_size();
        if initial_population.len() != population_size {
            return Err(ScheduleError::Configuration(format!(
                "Initial population has {} individuals, expected {}",
                initial_population.len(),
                population_size
            )));
        }

        Ok(Self {
            engine,
            challenge,
            population: initial_population,
            rng,
            phase: OptimizerPhase::Running,
            stop: StopHandle::new(),
        })
    }

    /// A handle that stops the run at the next generation boundary.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn phase(&self) -> OptimizerPhase {
        self.phase
    }

    pub fn population(&self) -> &[P] {
        &self.population
    }

    pub fn state(&self) -> &EvolutionState<P> {
        self.engine.state()
    }

    pub fn challenge(&self) -> &C {
        &self.challenge
    }

    /// Best individual found so far and its fitness.
    pub fn best(&self) -> Option<(&P, f64)> {
        self.engine.state().best()
    }

    /// Runs until the generation limit or a stop request, then finalizes.
    #[instrument(level = "debug", skip_all)]
    pub fn run<O>(&mut self, observer: &mut O) -> OptimizationResult<P>
    where
        O: GenerationObserver<P>,
    {
        while self.phase == OptimizerPhase::Running {
            self.step(observer);
        }

        self.finalize(observer)
    }

    /// Runs exactly one generation.
    ///
    /// Any fault while scoring or evolving makes the generation `Skipped`:
    /// the population is kept, the best-so-far is not touched and the
    /// generation counter still advances. Once the generation limit is
    /// reached or a stop is requested the optimizer moves to `Terminated`
    /// and no further generation runs.
    pub fn step<O>(&mut self, observer: &mut O) -> GenerationOutcome<P>
    where
        O: GenerationObserver<P>,
    {
        let generation = self.engine.generation();
        if self.phase == OptimizerPhase::Running {
            if let Some(reason) = self.termination() {
                self.phase = OptimizerPhase::Terminated(reason);
            }
        }
        if self.phase != OptimizerPhase::Running {
            return GenerationOutcome::Skipped {
                generation,
                reason: ScheduleError::Evolution("Optimizer is no longer running".to_string()),
            };
        }

        let mutation_rate = self.engine.decay_mutation_rate();

        let evolved = match self.score_population() {
            Ok(scores) => self
                .engine
                .try_evolve_population(&self.population, &scores, &mut self.rng)
                .map(|next| (scores, next)),
            Err(reason) => Err(reason),
        };

        let (scores, next) = match evolved {
            Ok(evolved) => evolved,
            Err(reason) => {
                warn!(generation, error = %reason, "Skipping generation");
                self.engine.skip_generation();
                return GenerationOutcome::Skipped { generation, reason };
            }
        };

        let elite = elite_index(&scores);
        let current_fitness = scores[elite];
        let current_best = self.population[elite].clone();
        self.engine
            .state_mut()
            .record(&current_best, current_fitness);
        let best_fitness = self.engine.state().best_fitness();

        match self.engine.options().get_log_level() {
            LogLevel::Verbose => {
                info!(generation, current_fitness, best_fitness, "Generation complete");
                debug!(generation, mutation_rate, ?scores, "Generation scores");
            }
            LogLevel::Minimal => {
                info!(generation, current_fitness, best_fitness, "Generation complete");
            }
            LogLevel::None => {}
        }

        let report = GenerationReport {
            generation,
            current_best,
            current_fitness,
            best_fitness,
            mutation_rate,
        };
        observer.on_generation(&report);

        self.population = next;
        GenerationOutcome::Scored(report)
    }

    fn termination(&self) -> Option<TerminationReason> {
        if self.stop.is_stopped() {
            Some(TerminationReason::Stopped)
        } else if self.engine.generation() >= self.engine.options().get_num_generations() {
            Some(TerminationReason::GenerationLimit)
        } else {
            None
        }
    }

    /// Scores every individual, in parallel for large populations.
    fn score_population(&self) -> Result<Vec<f64>> {
        if self.population.is_empty() {
            return Err(ScheduleError::EmptyPopulation);
        }

        let scores: Vec<f64> =
            if self.population.len() >= self.engine.options().get_parallel_threshold() {
                self.population
                    .par_iter()
                    .map(|candidate| self.challenge.score(candidate))
                    .collect()
            } else {
                self.population
                    .iter()
                    .map(|candidate| self.challenge.score(candidate))
                    .collect()
            };

        if let Some(score) = scores.iter().find(|score| !score.is_finite()) {
            return Err(ScheduleError::FitnessCalculation(format!(
                "Non-finite fitness score encountered: {}",
                score
            )));
        }

        Ok(scores)
    }

    fn finalize<O>(&mut self, observer: &mut O) -> OptimizationResult<P>
    where
        O: GenerationObserver<P>,
    {
        let termination = match self.phase {
            OptimizerPhase::Running => TerminationReason::Stopped,
            OptimizerPhase::Terminated(reason) | OptimizerPhase::Finalized(reason) => reason,
        };
        self.phase = OptimizerPhase::Finalized(termination);

        let state = self.engine.state();
        observer.on_finish(state.fitness_history());

        if self.engine.options().get_log_level() != LogLevel::None {
            info!(
                generations = state.generation(),
                best_fitness = state.best_fitness(),
                ?termination,
                "Optimization finished"
            );
        }

        OptimizationResult {
            best: state.best().map(|(pheno, _)| pheno.clone()),
            best_fitness: state.best_fitness(),
            generations: state.generation(),
            fitness_history: state.fitness_history().to_vec(),
            termination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Gene {
        value: f64,
    }

    impl Phenotype for Gene {
        fn crossover(&self, other: &Self, _rng: &mut RandomNumberGenerator) -> Self {
            Gene {
                value: (self.value + other.value) / 2.0,
            }
        }

        fn mutate(&self, mutation_rate: f64, rng: &mut RandomNumberGenerator) -> Self {
            let mut next = self.clone();
            if rng.gen_chance(mutation_rate) {
                next.value += rng.gen_range_f64(-1.0, 1.0);
            }
            next
        }
    }

    /// Peaks at `target`.
    struct Target {
        target: f64,
    }

    impl Challenge<Gene> for Target {
        fn score(&self, phenotype: &Gene) -> f64 {
            10.0 - (phenotype.value - self.target).abs()
        }
    }

    /// Fails with a non-finite score for negative values.
    struct Fragile;

    impl Challenge<Gene> for Fragile {
        fn score(&self, phenotype: &Gene) -> f64 {
            if phenotype.value < 0.0 {
                f64::NAN
            } else {
                phenotype.value
            }
        }
    }

    #[derive(Default)]
    struct Recorder {
        generations: Vec<usize>,
        finished_with: Option<Vec<f64>>,
    }

    impl GenerationObserver<Gene> for Recorder {
        fn on_generation(&mut self, report: &GenerationReport<Gene>) {
            self.generations.push(report.generation);
        }

        fn on_finish(&mut self, fitness_history: &[f64]) {
            self.finished_with = Some(fitness_history.to_vec());
        }
    }

    fn start() -> Vec<Gene> {
        (0..8).map(|i| Gene { value: i as f64 }).collect()
    }

    fn options(num_generations: usize) -> OptimizerOptions {
        OptimizerOptions::builder()
            .num_generations(num_generations)
            .population_size(8)
            .mutation_rate(0.5)
            .build()
    }

    #[test]
    fn test_run_to_generation_limit() {
        let mut optimizer = Optimizer::new(
            options(30),
            Target { target: 3.5 },
            start(),
            RandomNumberGenerator::from_seed(17),
        )
        .unwrap();
        let mut recorder = Recorder::default();

        let result = optimizer.run(&mut recorder);

        assert_eq!(result.termination, TerminationReason::GenerationLimit);
        assert_eq!(result.generations, 30);
        assert_eq!(result.fitness_history.len(), 30);
        assert_eq!(recorder.generations, (0..30).collect::<Vec<_>>());
        assert_eq!(recorder.finished_with, Some(result.fitness_history.clone()));
        assert_eq!(
            optimizer.phase(),
            OptimizerPhase::Finalized(TerminationReason::GenerationLimit)
        );

        // Elitism keeps the generation best from ever dropping
        for pair in result.fitness_history.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
        let best = result.best.unwrap();
        assert_eq!(result.best_fitness, 10.0 - (best.value - 3.5).abs());
    }

    #[test]
    fn test_stop_before_first_generation() {
        let mut optimizer = Optimizer::new(
            options(30),
            Target { target: 1.0 },
            start(),
            RandomNumberGenerator::from_seed(2),
        )
        .unwrap();
        optimizer.stop_handle().stop();

        let result = optimizer.run(&mut ());

        assert_eq!(result.termination, TerminationReason::Stopped);
        assert_eq!(result.generations, 0);
        assert_eq!(result.best, None);
        assert_eq!(result.best_fitness, 0.0);
    }

    #[test]
    fn test_stop_from_observer() {
        struct StopAfter {
            handle: StopHandle,
            after: usize,
        }

        impl GenerationObserver<Gene> for StopAfter {
            fn on_generation(&mut self, report: &GenerationReport<Gene>) {
                if report.generation + 1 == self.after {
                    self.handle.stop();
                }
            }
        }

        let mut optimizer = Optimizer::new(
            options(100),
            Target { target: 1.0 },
            start(),
            RandomNumberGenerator::from_seed(2),
        )
        .unwrap();
        let mut observer = StopAfter {
            handle: optimizer.stop_handle(),
            after: 5,
        };

        let result = optimizer.run(&mut observer);

        assert_eq!(result.termination, TerminationReason::Stopped);
        assert_eq!(result.generations, 5);
        assert!(result.best.is_some());
    }

    #[test]
    fn test_faulty_generation_is_skipped() {
        let mut population = start();
        population[3].value = -1.0;
        let mut optimizer = Optimizer::new(
            options(5),
            Fragile,
            population.clone(),
            RandomNumberGenerator::from_seed(9),
        )
        .unwrap();

        let outcome = optimizer.step(&mut ());

        assert!(matches!(
            outcome,
            GenerationOutcome::Skipped {
                generation: 0,
                reason: ScheduleError::FitnessCalculation(_)
            }
        ));
        assert_eq!(optimizer.population(), &population[..]);
        assert_eq!(optimizer.state().generation(), 1);
        assert_eq!(optimizer.best(), None);
        assert!(optimizer.state().fitness_history().is_empty());

        // The loop keeps going and still terminates
        let result = optimizer.run(&mut ());
        assert_eq!(result.generations, 5);
        assert_eq!(result.termination, TerminationReason::GenerationLimit);
    }

    #[test]
    fn test_step_after_finalize_is_skipped() {
        let mut optimizer = Optimizer::new(
            options(1),
            Target { target: 0.0 },
            start(),
            RandomNumberGenerator::from_seed(3),
        )
        .unwrap();
        let _ = optimizer.run(&mut ());

        let outcome = optimizer.step(&mut ());
        assert!(!outcome.is_scored());
        assert_eq!(optimizer.state().generation(), 1);
    }

    #[test]
    fn test_step_honours_generation_limit() {
        let mut optimizer = Optimizer::new(
            options(2),
            Target { target: 1.0 },
            start(),
            RandomNumberGenerator::from_seed(6),
        )
        .unwrap();

        assert!(optimizer.step(&mut ()).is_scored());
        assert!(optimizer.step(&mut ()).is_scored());

        let outcome = optimizer.step(&mut ());
        assert!(matches!(
            outcome,
            GenerationOutcome::Skipped {
                generation: 2,
                reason: ScheduleError::Evolution(_)
            }
        ));
        assert_eq!(
            optimizer.phase(),
            OptimizerPhase::Terminated(TerminationReason::GenerationLimit)
        );
        assert_eq!(optimizer.state().generation(), 2);

        let result = optimizer.run(&mut ());
        assert_eq!(result.termination, TerminationReason::GenerationLimit);
        assert_eq!(result.fitness_history.len(), 2);
    }

    #[test]
    fn test_step_honours_stop_request() {
        let mut optimizer = Optimizer::new(
            options(10),
            Target { target: 1.0 },
            start(),
            RandomNumberGenerator::from_seed(6),
        )
        .unwrap();
        assert!(optimizer.step(&mut ()).is_scored());

        optimizer.stop_handle().stop();
        assert!(!optimizer.step(&mut ()).is_scored());
        assert_eq!(
            optimizer.phase(),
            OptimizerPhase::Terminated(TerminationReason::Stopped)
        );
        assert_eq!(optimizer.state().generation(), 1);
    }

    #[test]
    fn test_parallel_scoring_matches_sequential() {
        let build = |threshold| {
            let options = OptimizerOptions::builder()
                .num_generations(10)
                .population_size(8)
                .parallel_threshold(threshold)
                .build();
            Optimizer::new(
                options,
                Target { target: 2.0 },
                start(),
                RandomNumberGenerator::from_seed(21),
            )
            .unwrap()
        };

        let sequential = build(1000).run(&mut ());
        let parallel = build(1).run(&mut ());

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_empty_initial_population_is_rejected() {
        let result = Optimizer::new(
            options(5),
            Target { target: 0.0 },
            Vec::new(),
            RandomNumberGenerator::from_seed(1),
        );
        assert!(matches!(result, Err(ScheduleError::EmptyPopulation)));
    }

    #[test]
    fn test_population_size_mismatch_is_rejected() {
        let mut population = start();
        population.truncate(5);

        let result = Optimizer::new(
            options(5),
            Target { target: 0.0 },
            population,
            RandomNumberGenerator::from_seed(1),
        );
        assert!(matches!(result, Err(ScheduleError::Configuration(_))));
    }
}
