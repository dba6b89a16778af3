use std::fmt::Debug;

use crate::error::Result;
use crate::rng::RandomNumberGenerator;

/// Trait for parent selection strategies.
///
/// A selection strategy picks one individual from the population based on
/// the fitness scores of the current generation.
///
/// # Examples
///
/// ```
/// use classched::selection::{SelectionStrategy, TournamentSelection};
/// use classched::rng::RandomNumberGenerator;
/// use classched::error::Result;
///
/// fn main() -> Result<()> {
///     let population = vec!["a", "b", "c"];
///     let fitness = vec![0.5, 0.8, 0.3];
///     let mut rng = RandomNumberGenerator::from_seed(3);
///
///     let selection = TournamentSelection::new(3)?;
///     let parent = selection.select(&population, &fitness, &mut rng)?;
///
///     assert_eq!(*parent, "b");
///     Ok(())
/// }
/// ```
pub trait SelectionStrategy<P>: Debug + Send + Sync {
    /// Selects one individual from the population.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The population or the fitness vector is empty
    /// - The fitness vector length doesn't match the population length
    fn select<'a>(
        &self,
        population: &'a [P],
        fitness: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Result<&'a P>;
}
