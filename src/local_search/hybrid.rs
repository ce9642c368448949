use crate::dataset::Dataset;
use crate::error::Result;
use crate::relevance::FeatureGroups;
use crate::rng::RandomNumberGenerator;

use super::{CorrelationLocalSearch, SubsetSizeDistribution};

/// Local search step of the hybrid GA and PSO variants: draw a target size from
/// the subset size distribution, then rebalance the mask toward it.
#[derive(Debug, Clone)]
pub struct HybridLocalSearch {
    local_search: CorrelationLocalSearch,
    sizes: SubsetSizeDistribution,
}

impl HybridLocalSearch {
    pub fn new(local_search: CorrelationLocalSearch, sizes: SubsetSizeDistribution) -> Self {
        Self {
            local_search,
            sizes,
        }
    }

    /// Groups the features of `dataset` by correlation and builds both operators.
    ///
    /// # Errors
    ///
    /// Returns an error if `alpha` or `mu` is outside `[0, 1]`.
    pub fn from_dataset(dataset: &Dataset, alpha: f64, mu: f64) -> Result<Self> {
        Ok(Self::new(
            CorrelationLocalSearch::new(FeatureGroups::from_correlation(dataset), alpha)?,
            SubsetSizeDistribution::new(dataset.num_features(), mu)?,
        ))
    }

    pub fn local_search(&self) -> &CorrelationLocalSearch {
        &self.local_search
    }

    pub fn sizes(&self) -> &SubsetSizeDistribution {
        &self.sizes
    }

    /// Samples a target size `k`, rebalances `mask` toward it and returns `k`.
    pub fn apply(&self, mask: &mut [bool], rng: &mut RandomNumberGenerator) -> usize {
        let k = self.sizes.sample(rng);
        self.local_search.apply(mask, k);
        k
    }

    /// A random mask already balanced for a sampled target size.
    pub fn random_mask(&self, num_features: usize, rng: &mut RandomNumberGenerator) -> Vec<bool> {
        let k = self.sizes.sample(rng);
        let mut mask = vec![false; num_features];
        for feature in rng.sample_indices(num_features, k) {
            mask[feature] = true;
        }
        self.local_search.apply(&mut mask, k);
        mask
    }
}
