use std::fmt::Debug;

use crate::error::{Result, SearchError};
use crate::rng::RandomNumberGenerator;
use crate::selection::roulette::roulette_wheel;

/// Trait for mating-pool selection strategies.
///
/// A strategy turns the fitness of a population into one selection probability per
/// candidate. The mating pool is then drawn from those probabilities with the
/// roulette wheel, with replacement.
///
/// # Examples
///
/// ```
/// use featsel::selection::{RankBasedSelection, SelectionStrategy};
/// use featsel::rng::RandomNumberGenerator;
///
/// let fitness = vec![10.0, 20.0, 30.0];
/// let mut rng = RandomNumberGenerator::from_seed(5);
///
/// let pool = RankBasedSelection.select(&fitness, 4, &mut rng).unwrap();
/// assert_eq!(pool.len(), 4);
/// assert!(pool.iter().all(|&i| i < 3));
/// ```
pub trait SelectionStrategy: Debug + Send + Sync {
    /// Returns one selection probability per candidate. The probabilities sum to one.
    ///
    /// # Errors
    ///
    /// Returns an error if `fitness` is empty or holds values the strategy cannot
    /// weigh.
    fn probabilities(&self, fitness: &[f64]) -> Result<Vec<f64>>;

    /// Draws `num_to_select` candidate indices, with replacement.
    fn select(
        &self,
        fitness: &[f64],
        num_to_select: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<usize>> {
        if fitness.is_empty() {
            return Err(SearchError::EmptyPopulation);
        }

        let probabilities = self.probabilities(fitness)?;
        Ok((0..num_to_select)
            .map(|_| roulette_wheel(&probabilities, rng))
            .collect())
    }
}
