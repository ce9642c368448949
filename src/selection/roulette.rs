use crate::error::{Result, SearchError};
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// Spins the roulette wheel over `probabilities`.
///
/// Draws `r` uniformly from `[0, 1)` and returns the first index whose cumulative
/// probability exceeds `r`, so entries with zero probability are never picked.
/// When floating-point rounding leaves the total just short of `r`, the last
/// index with positive probability is returned (the last index if there is
/// none), so the result is always in range for a non-empty slice.
///
/// # Examples
///
/// ```
/// use featsel::rng::RandomNumberGenerator;
/// use featsel::selection::roulette_wheel;
///
/// let mut rng = RandomNumberGenerator::from_seed(1);
/// assert_eq!(roulette_wheel(&[0.0, 1.0, 0.0], &mut rng), 1);
/// ```
pub fn roulette_wheel(probabilities: &[f64], rng: &mut RandomNumberGenerator) -> usize {
    spin_at(probabilities, rng.uniform())
}

fn spin_at(probabilities: &[f64], r: f64) -> usize {
    let mut cumulative = 0.0;

    for (i, &probability) in probabilities.iter().enumerate() {
        cumulative += probability;
        if cumulative > r {
            return i;
        }
    }

    probabilities
        .iter()
        .rposition(|&p| p > 0.0)
        .unwrap_or_else(|| probabilities.len().saturating_sub(1))
}

/// Fitness-proportional selection: `p_i = f_i / Σ f`.
///
/// Fitness values must be non-negative. When every candidate has zero fitness
/// (for example a population of empty subsets) all candidates are equally likely.
///
/// # Examples
///
/// ```
/// use featsel::selection::{FitnessProportionalSelection, SelectionStrategy};
///
/// let probabilities = FitnessProportionalSelection
///     .probabilities(&[1.0, 3.0])
///     .unwrap();
/// assert_eq!(probabilities, vec![0.25, 0.75]);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct FitnessProportionalSelection;

impl SelectionStrategy for FitnessProportionalSelection {
    fn probabilities(&self, fitness: &[f64]) -> Result<Vec<f64>> {
        if fitness.is_empty() {
            return Err(SearchError::EmptyPopulation);
        }

        if fitness.iter().any(|f| !f.is_finite() || *f < 0.0) {
            return Err(SearchError::Configuration(
                "Fitness-proportional selection requires finite, non-negative fitness values"
                    .to_string(),
            ));
        }

        let sum: f64 = fitness.iter().sum();
        if sum == 0.0 {
            let uniform = 1.0 / fitness.len() as f64;
            return Ok(vec![uniform; fitness.len()]);
        }

        Ok(fitness.iter().map(|f| f / sum).collect())
    }
}
