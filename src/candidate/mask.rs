use std::ops::Index;

use crate::rng::RandomNumberGenerator;

/// A boolean selection over `num_features` features.
///
/// # Examples
///
/// ```
/// use featsel::candidate::FeatureMask;
///
/// let mut mask = FeatureMask::new(5);
/// mask.set(3, true);
/// mask.set(1, true);
///
/// assert_eq!(mask.count(), 2);
/// assert_eq!(mask.selected(), vec![1, 3]);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FeatureMask {
    genes: Vec<bool>,
}

impl FeatureMask {
    /// An empty selection.
    pub fn new(num_features: usize) -> Self {
        Self {
            genes: vec![false; num_features],
        }
    }

    /// Every feature selected.
    pub fn full(num_features: usize) -> Self {
        Self {
            genes: vec![true; num_features],
        }
    }

    pub fn from_genes(genes: Vec<bool>) -> Self {
        Self { genes }
    }

    /// Selects `indices`. Indices outside `[0, num_features)` are ignored.
    pub fn from_indices(num_features: usize, indices: &[usize]) -> Self {
        let mut mask = Self::new(num_features);
        for &i in indices {
            if i < num_features {
                mask.genes[i] = true;
            }
        }
        mask
    }

    /// Selects each feature independently with probability `p`.
    pub fn random(num_features: usize, p: f64, rng: &mut RandomNumberGenerator) -> Self {
        Self {
            genes: (0..num_features).map(|_| rng.chance(p)).collect(),
        }
    }

    /// Selects exactly `size` distinct features, uniformly at random.
    pub fn random_with_size(num_features: usize, size: usize, rng: &mut RandomNumberGenerator) -> Self {
        Self::from_indices(num_features, &rng.sample_indices(num_features, size))
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn get(&self, feature: usize) -> bool {
        self.genes.get(feature).copied().unwrap_or(false)
    }

    pub fn set(&mut self, feature: usize, selected: bool) {
        if let Some(gene) = self.genes.get_mut(feature) {
            *gene = selected;
        }
    }

    pub fn genes(&self) -> &[bool] {
        &self.genes
    }

    pub fn genes_mut(&mut self) -> &mut [bool] {
        &mut self.genes
    }

    /// Number of selected features.
    pub fn count(&self) -> usize {
        self.genes.iter().filter(|&&g| g).count()
    }

    /// Selected feature indices in increasing order.
    pub fn selected(&self) -> Vec<usize> {
        self.genes
            .iter()
            .enumerate()
            .filter_map(|(i, &g)| g.then_some(i))
            .collect()
    }
}

impl AsRef<[bool]> for FeatureMask {
    fn as_ref(&self) -> &[bool] {
        &self.genes
    }
}

impl AsMut<[bool]> for FeatureMask {
    fn as_mut(&mut self) -> &mut [bool] {
        &mut self.genes
    }
}

impl Index<usize> for FeatureMask {
    type Output = bool;

    fn index(&self, index: usize) -> &bool {
        &self.genes[index]
    }
}

impl From<Vec<bool>> for FeatureMask {
    fn from(genes: Vec<bool>) -> Self {
        Self::from_genes(genes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_is_strictly_increasing() {
        let mask = FeatureMask::from_indices(8, &[7, 2, 2, 5, 11]);
        assert_eq!(mask.selected(), vec![2, 5, 7]);
        assert_eq!(mask.count(), 3);
    }

    #[test]
    fn test_random_with_size() {
        let mut rng = RandomNumberGenerator::from_seed(6);
        for size in 0..=10 {
            let mask = FeatureMask::random_with_size(10, size, &mut rng);
            assert_eq!(mask.count(), size);
        }
        // Clamped to the number of features.
        assert_eq!(FeatureMask::random_with_size(4, 9, &mut rng).count(), 4);
    }

    #[test]
    fn test_out_of_range_access_is_ignored() {
        let mut mask = FeatureMask::new(3);
        mask.set(5, true);
        assert!(!mask.get(5));
        assert_eq!(mask.count(), 0);
    }
}
