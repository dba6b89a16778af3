use tracing::warn;

use super::{options::OptimizerOptions, state::EvolutionState};
use crate::{
    error::{Result, ScheduleError},
    phenotype::Phenotype,
    rng::RandomNumberGenerator,
    selection::{SelectionStrategy, TournamentSelection},
};

/// Produces each new generation from the scored previous one.
///
/// The best individual is carried over unchanged; every other slot of the
/// new population is filled by selecting two parents, crossing them over and
/// mutating the child at the current mutation rate.
#[derive(Debug, Clone)]
pub struct EvolutionEngine<P, S = TournamentSelection>
where
    P: Phenotype,
    S: SelectionStrategy<P>,
{
    options: OptimizerOptions,
    selection: S,
    state: EvolutionState<P>,
}

impl<P> EvolutionEngine<P, TournamentSelection>
where
    P: Phenotype,
{
    /// Creates an engine using tournament selection with the configured
    /// tournament size.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the options are invalid.
    pub fn new(options: OptimizerOptions) -> Result<Self> {
        let selection = TournamentSelection::new(options.get_tournament_size())?;
        Self::with_selection(options, selection)
    }
}

impl<P, S> EvolutionEngine<P, S>
where
    P: Phenotype,
    S: SelectionStrategy<P>,
{
    pub fn with_selection(options: OptimizerOptions, selection: S) -> Result<Self> {
        options.validate()?;
        let state = EvolutionState::new(options.get_mutation_rate());
        Ok(Self {
            options,
            selection,
            state,
        })
    }

    pub fn options(&self) -> &OptimizerOptions {
        &self.options
    }

    pub fn state(&self) -> &EvolutionState<P> {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut EvolutionState<P> {
        &mut self.state
    }

    pub fn generation(&self) -> usize {
        self.state.generation()
    }

    pub fn mutation_rate(&self) -> f64 {
        self.state.mutation_rate()
    }

    /// Sets the mutation rate for the current generation from the
    /// generation counter and returns it.
    pub fn decay_mutation_rate(&mut self) -> f64 {
        let rate = self.options.mutation_rate_at(self.state.generation());
        self.state.set_mutation_rate(rate);
        rate
    }

    /// Counts a generation that produced no new population.
    pub fn skip_generation(&mut self) {
        self.state.advance();
    }

    /// Builds the next population.
    ///
    /// An empty population, empty scores or scores of the wrong length are
    /// a caller error; the population is then returned unchanged and the
    /// generation counter is not advanced.
    pub fn evolve_population(
        &mut self,
        population: Vec<P>,
        scores: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Vec<P> {
        match self.try_evolve_population(&population, scores, rng) {
            Ok(next) => next,
            Err(e) => {
                warn!(generation = self.state.generation(), error = %e, "Population left unchanged");
                population
            }
        }
    }

    /// Builds the next population, reporting precondition violations as
    /// errors.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPopulation` if the population or scores are empty and
    /// a `Configuration` error if their lengths differ.
    pub fn try_evolve_population(
        &mut self,
        population: &[P],
        scores: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<P>> {
        if population.is_empty() || scores.is_empty() {
            return Err(ScheduleError::EmptyPopulation);
        }
        if population.len() != scores.len() {
            return Err(ScheduleError::Configuration(format!(
                "Fitness vector length ({}) doesn't match population length ({})",
                scores.len(),
                population.len()
            )));
        }

        let population_size = self.options.get_population_size();
        let mutation_rate = self.state.mutation_rate();

        let mut next = Vec::with_capacity(population_size);
        next.push(population[elite_index(scores)].clone());

        while next.len() < population_size {
            let parent_a = self.selection.select(population, scores, rng)?;
            let parent_b = self.selection.select(population, scores, rng)?;
            let child = parent_a.crossover(parent_b, rng);
            next.push(child.mutate(mutation_rate, rng));
        }

        self.state.advance();
        Ok(next)
    }
}

/// Index of the first highest score. `scores` must not be empty.
pub(crate) fn elite_index(scores: &[f64]) -> usize {
    scores
        .iter()
        .enumerate()
        .fold(0, |best, (idx, score)| {
            if *score > scores[best] {
                idx
            } else {
                best
            }
        })
}
