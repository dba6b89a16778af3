/// Bookkeeping carried from one generation to the next.
///
/// Everything else in a run is replaced wholesale every generation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionState<P> {
    generation: usize,
    mutation_rate: f64,
    best: Option<(P, f64)>,
    fitness_history: Vec<f64>,
}

impl<P: Clone> EvolutionState<P> {
    pub fn new(mutation_rate: f64) -> Self {
        Self {
            generation: 0,
            mutation_rate,
            best: None,
            fitness_history: Vec::new(),
        }
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Best individual seen so far and its fitness.
    pub fn best(&self) -> Option<(&P, f64)> {
        self.best.as_ref().map(|(pheno, score)| (pheno, *score))
    }

    /// Best fitness seen so far, `0.0` before the first scored generation.
    pub fn best_fitness(&self) -> f64 {
        self.best.as_ref().map_or(0.0, |(_, score)| *score)
    }

    /// Best fitness of every scored generation, in order.
    pub fn fitness_history(&self) -> &[f64] {
        &self.fitness_history
    }

    /// Records the best individual of a generation.
    ///
    /// The running best starts at `0.0` and is replaced only on strict
    /// improvement, so a run whose scores never rise above zero keeps no
    /// best individual. Returns whether it was replaced.
    pub(crate) fn record(&mut self, candidate: &P, score: f64) -> bool {
        self.fitness_history.push(score);

        let improved = score > self.best_fitness();
        if improved {
            self.best = Some((candidate.clone(), score));
        }
        improved
    }

    pub(crate) fn set_mutation_rate(&mut self, mutation_rate: f64) {
        self.mutation_rate = mutation_rate;
    }

    pub(crate) fn advance(&mut self) {
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_strict_best() {
        let mut state: EvolutionState<&str> = EvolutionState::new(0.1);
        assert_eq!(state.best(), None);
        assert_eq!(state.best_fitness(), 0.0);

        // A zero score does not beat the initial 0.0
        assert!(!state.record(&"first", 0.0));
        assert_eq!(state.best(), None);

        assert!(state.record(&"second", 2.0));
        // Equal score does not replace the stored best
        assert!(!state.record(&"third", 2.0));
        assert!(!state.record(&"fourth", 1.0));

        assert_eq!(state.best(), Some((&"second", 2.0)));
        assert_eq!(state.fitness_history(), &[0.0, 2.0, 2.0, 1.0]);
    }

    #[test]
    fn test_generation_counter() {
        let mut state: EvolutionState<u8> = EvolutionState::new(0.1);
        assert_eq!(state.generation(), 0);
        state.advance();
        state.advance();
        assert_eq!(state.generation(), 2);

        state.set_mutation_rate(0.05);
        assert_eq!(state.mutation_rate(), 0.05);
    }
}
