use crate::error::{Result, SearchError};
use crate::rng::RandomNumberGenerator;
use crate::selection::roulette_wheel;

/// Distribution of target subset sizes used by the hybrid search variants.
///
/// Sizes range over `[1, ε]` with `ε = max(1, round(mu * n))`, capped at `n`. Size
/// `s` is weighted by `n - s`, which favours small subsets. When every weight
/// vanishes (a single feature) the distribution falls back to uniform.
///
/// # Examples
///
/// ```
/// use featsel::local_search::SubsetSizeDistribution;
/// use featsel::rng::RandomNumberGenerator;
///
/// let distribution = SubsetSizeDistribution::new(10, 0.3).unwrap();
/// assert_eq!(distribution.max_size(), 3);
///
/// let mut rng = RandomNumberGenerator::from_seed(2);
/// let size = distribution.sample(&mut rng);
/// assert!((1..=3).contains(&size));
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SubsetSizeDistribution {
    probabilities: Vec<f64>,
}

impl SubsetSizeDistribution {
    /// Builds the distribution for `num_features` features.
    ///
    /// # Errors
    ///
    /// Returns an error if `num_features` is zero or `mu` is outside `[0, 1]`.
    pub fn new(num_features: usize, mu: f64) -> Result<Self> {
        if num_features == 0 {
            return Err(SearchError::Configuration(
                "Subset size distribution needs at least one feature".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&mu) {
            return Err(SearchError::Configuration(format!(
                "Subset size ratio must be in [0, 1], got {}",
                mu
            )));
        }

        let max_size = ((mu * num_features as f64).round() as usize).clamp(1, num_features);
        let weights: Vec<f64> = (1..=max_size)
            .map(|size| (num_features - size) as f64)
            .collect();
        let total: f64 = weights.iter().sum();

        let probabilities = if total > 0.0 {
            weights.iter().map(|w| w / total).collect()
        } else {
            tracing::trace!(max_size, "Subset size weights vanish, using uniform sizes");
            vec![1.0 / max_size as f64; max_size]
        };

        Ok(Self { probabilities })
    }

    /// Largest size the distribution can produce.
    pub fn max_size(&self) -> usize {
        self.probabilities.len()
    }

    /// Probability of size `s` is `probabilities()[s - 1]`.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Draws a target size with the roulette wheel.
    pub fn sample(&self, rng: &mut RandomNumberGenerator) -> usize {
        roulette_wheel(&self.probabilities, rng) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_favour_small_sizes() {
        let distribution = SubsetSizeDistribution::new(10, 0.4).unwrap();
        // Weights 9, 8, 7, 6 over a total of 30.
        let expected = [0.3, 8.0 / 30.0, 7.0 / 30.0, 0.2];
        for (p, e) in distribution.probabilities().iter().zip(expected) {
            assert!((p - e).abs() < 1e-12);
        }
    }

    #[test]
    fn test_at_least_one_size() {
        let distribution = SubsetSizeDistribution::new(50, 0.0).unwrap();
        assert_eq!(distribution.max_size(), 1);
        assert_eq!(distribution.probabilities(), &[1.0]);
    }

    #[test]
    fn test_single_feature_falls_back_to_uniform() {
        let distribution = SubsetSizeDistribution::new(1, 1.0).unwrap();
        assert_eq!(distribution.probabilities(), &[1.0]);
        let mut rng = RandomNumberGenerator::from_seed(0);
        assert_eq!(distribution.sample(&mut rng), 1);
    }

    #[test]
    fn test_samples_stay_in_range() {
        let distribution = SubsetSizeDistribution::new(20, 0.5).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(19);
        for _ in 0..500 {
            let size = distribution.sample(&mut rng);
            assert!((1..=10).contains(&size));
        }
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(SubsetSizeDistribution::new(0, 0.5).is_err());
        assert!(SubsetSizeDistribution::new(5, 1.2).is_err());
    }
}
