use crate::error::{OptionExt, Result, ScheduleError};
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

pub const DEFAULT_TOURNAMENT_SIZE: usize = 3;

/// A selection strategy that picks the best of a small random group.
///
/// Each call samples `min(tournament_size, population.len())` distinct
/// individuals and returns the one with the highest fitness; the first
/// sampled individual wins ties. With a tournament at least as large as the
/// population the selection degenerates to picking the overall best.
///
/// # Examples
///
/// ```
/// use classched::selection::{SelectionStrategy, TournamentSelection};
/// use classched::rng::RandomNumberGenerator;
///
/// let population = vec![1, 2, 3, 4, 5];
/// let fitness = vec![0.5, 0.8, 0.3, 0.9, 0.1];
/// let mut rng = RandomNumberGenerator::from_seed(42);
///
/// let selection = TournamentSelection::new(5).unwrap();
/// let winner = selection.select(&population, &fitness, &mut rng).unwrap();
/// assert_eq!(*winner, 4);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    /// Creates a new TournamentSelection strategy.
    ///
    /// # Errors
    ///
    /// Returns an error if `tournament_size` is 0.
    pub fn new(tournament_size: usize) -> Result<Self> {
        if tournament_size < 1 {
            return Err(ScheduleError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }

        Ok(Self { tournament_size })
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Runs a single tournament and returns the index of the winner.
    fn run_tournament(&self, fitness: &[f64], rng: &mut RandomNumberGenerator) -> Result<usize> {
        let participants = rng.sample_distinct(fitness.len(), self.tournament_size);

        participants
            .into_iter()
            .reduce(|best, idx| if fitness[idx] > fitness[best] { idx } else { best })
            .ok_or_else_schedule(|| ScheduleError::EmptyPopulation)
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self {
            tournament_size: DEFAULT_TOURNAMENT_SIZE,
        }
    }
}

impl<P> SelectionStrategy<P> for TournamentSelection {
    fn select<'a>(
        &self,
        population: &'a [P],
        fitness: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Result<&'a P> {
        if population.is_empty() || fitness.is_empty() {
            return Err(ScheduleError::EmptyPopulation);
        }

        if fitness.len() != population.len() {
            return Err(ScheduleError::Configuration(format!(
                "Fitness vector length ({}) doesn't match population length ({})",
                fitness.len(),
                population.len()
            )));
        }

        let winner = self.run_tournament(fitness, rng)?;
        Ok(&population[winner])
    }
}
