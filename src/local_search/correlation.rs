use crate::error::{Result, SearchError};
use crate::relevance::FeatureGroups;

/// Pushes a feature mask toward a fixed split between dissimilar and similar
/// features.
///
/// For a target subset size `k`, the operator aims for `Nd = round(alpha * k)`
/// features from the dissimilar pool and `Ns = k - Nd` from the similar pool. Each
/// count is clamped to the size of its pool. Missing features are added in pool
/// order, surplus features are removed in reverse pool order, so the least
/// correlated features are favoured in both pools.
///
/// Applying the operator to a mask that is already balanced changes nothing.
///
/// # Examples
///
/// ```
/// use featsel::local_search::CorrelationLocalSearch;
/// use featsel::relevance::FeatureGroups;
///
/// // Features 0..3 are dissimilar, 3..6 are similar.
/// let groups = FeatureGroups::from_scores(&[0.1, 0.2, 0.3, 0.7, 0.8, 0.9]);
/// let search = CorrelationLocalSearch::new(groups, 0.5).unwrap();
///
/// let mut mask = vec![false; 6];
/// assert!(search.apply(&mut mask, 4));
/// assert_eq!(mask, vec![true, true, false, true, true, false]);
/// ```
#[derive(Debug, Clone)]
pub struct CorrelationLocalSearch {
    groups: FeatureGroups,
    alpha: f64,
}

impl CorrelationLocalSearch {
    /// Creates the operator.
    ///
    /// # Errors
    ///
    /// Returns an error if `alpha` is outside `[0, 1]`.
    pub fn new(groups: FeatureGroups, alpha: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(SearchError::Configuration(format!(
                "Local search alpha must be in [0, 1], got {}",
                alpha
            )));
        }
        Ok(Self { groups, alpha })
    }

    pub fn groups(&self) -> &FeatureGroups {
        &self.groups
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns the clamped `(Nd, Ns)` split for a target size `k`.
    pub fn targets(&self, k: usize) -> (usize, usize) {
        let dissimilar = ((self.alpha * k as f64).round() as usize).min(self.groups.dissimilar().len());
        let similar = k.saturating_sub(dissimilar).min(self.groups.similar().len());
        (dissimilar, similar)
    }

    /// Reshapes `mask` toward the split for target size `k`.
    ///
    /// Returns `true` if any gene changed. Features outside the mask are ignored.
    pub fn apply(&self, mask: &mut [bool], k: usize) -> bool {
        let (dissimilar, similar) = self.targets(k);
        let changed_dissimilar = balance_pool(mask, self.groups.dissimilar(), dissimilar);
        let changed_similar = balance_pool(mask, self.groups.similar(), similar);
        changed_dissimilar || changed_similar
    }
}

fn balance_pool(mask: &mut [bool], pool: &[usize], target: usize) -> bool {
    let mut count = pool
        .iter()
        .filter(|&&f| mask.get(f).copied().unwrap_or(false))
        .count();
    let mut changed = false;

    if count < target {
        for &feature in pool {
            if count == target {
                break;
            }
            if let Some(gene) = mask.get_mut(feature) {
                if !*gene {
                    *gene = true;
                    count += 1;
                    changed = true;
                }
            }
        }
    } else if count > target {
        for &feature in pool.iter().rev() {
            if count == target {
                break;
            }
            if let Some(gene) = mask.get_mut(feature) {
                if *gene {
                    *gene = false;
                    count -= 1;
                    changed = true;
                }
            }
        }
    }

    changed
}
