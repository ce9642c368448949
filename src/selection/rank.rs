use std::cmp::Ordering;

use crate::error::{Result, SearchError};
use crate::selection::selection_strategy::SelectionStrategy;

/// A selection strategy that weighs individuals by their rank in the population.
///
/// Individuals are ranked in ascending order of fitness, the worst receiving rank 1
/// and the best rank `n`; equal fitness keeps population order. The selection
/// probability is `rank / Σ rank`, so even the worst individual keeps a small,
/// non-zero chance. Absolute fitness differences don't matter, which stops a single
/// outlier from taking over the mating pool.
///
/// # Examples
///
/// ```
/// use featsel::selection::{RankBasedSelection, SelectionStrategy};
///
/// let probabilities = RankBasedSelection.probabilities(&[30.0, 10.0, 20.0]).unwrap();
/// assert!((probabilities[1] - 1.0 / 6.0).abs() < 1e-12);
/// assert!((probabilities[0] - 3.0 / 6.0).abs() < 1e-12);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct RankBasedSelection;

impl RankBasedSelection {
    /// Returns the 1-based ascending rank of each individual.
    pub fn ranks(fitness: &[f64]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..fitness.len()).collect();

        // NaN sorts as the worst value.
        indices.sort_by(|&a, &b| {
            let (fa, fb) = (fitness[a], fitness[b]);
            match (fa.is_nan(), fb.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                (false, false) => fa.partial_cmp(&fb).unwrap_or(Ordering::Equal),
            }
        });

        let mut ranks = vec![0; fitness.len()];
        for (position, &idx) in indices.iter().enumerate() {
            ranks[idx] = position + 1;
        }
        ranks
    }
}

impl SelectionStrategy for RankBasedSelection {
    fn probabilities(&self, fitness: &[f64]) -> Result<Vec<f64>> {
        if fitness.is_empty() {
            return Err(SearchError::EmptyPopulation);
        }

        let n = fitness.len() as f64;
        let rank_sum = n * (n + 1.0) / 2.0;

        Ok(Self::ranks(fitness)
            .into_iter()
            .map(|rank| rank as f64 / rank_sum)
            .collect())
    }
}
