//! Pairwise feature similarity and the correlation-based feature grouping used by the
//! hybrid local search.

use crate::dataset::Dataset;
use crate::matrix::SymmetricMatrix;

use super::RelevanceScorer;

fn cosine(x: &[f64], y: &[f64]) -> f64 {
    let dot: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
    let norm_x = x.iter().map(|a| a * a).sum::<f64>().sqrt();
    let norm_y = y.iter().map(|b| b * b).sum::<f64>().sqrt();
    let denominator = norm_x * norm_y;
    if denominator == 0.0 {
        0.0
    } else {
        (dot / denominator).abs().min(1.0)
    }
}

fn centered(column: &[f64]) -> Vec<f64> {
    let mean = column.iter().sum::<f64>() / column.len() as f64;
    column.iter().map(|x| x - mean).collect()
}

/// Absolute cosine similarity between every pair of feature columns.
///
/// A constant zero column has similarity 0 to everything.
pub fn absolute_cosine(dataset: &Dataset) -> SymmetricMatrix {
    let columns = dataset.columns();
    SymmetricMatrix::from_fn(dataset.num_features(), |i, j| cosine(&columns[i], &columns[j]))
}

/// Absolute Pearson correlation between every pair of feature columns.
///
/// A constant column has correlation 0 to everything.
pub fn absolute_pearson(dataset: &Dataset) -> SymmetricMatrix {
    let columns: Vec<Vec<f64>> = dataset.columns().iter().map(|c| centered(c)).collect();
    SymmetricMatrix::from_fn(dataset.num_features(), |i, j| cosine(&columns[i], &columns[j]))
}

/// Mean absolute Pearson correlation of each feature with every other feature.
///
/// Low values mark features that carry information the rest of the feature space
/// does not.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrelationToOthers;

impl RelevanceScorer for CorrelationToOthers {
    fn raw_scores(&self, dataset: &Dataset) -> Vec<f64> {
        let correlation = absolute_pearson(dataset);
        (0..dataset.num_features())
            .map(|i| correlation.row_mean(i))
            .collect()
    }
}

/// Features split into a dissimilar pool and a similar pool.
///
/// Both pools are ordered by ascending correlation-to-others, so the first entry of
/// the dissimilar pool is the feature least correlated with the rest.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureGroups {
    dissimilar: Vec<usize>,
    similar: Vec<usize>,
}

impl FeatureGroups {
    /// Groups features by their mean absolute correlation with all other features.
    pub fn from_correlation(dataset: &Dataset) -> Self {
        Self::from_scores(&CorrelationToOthers.raw_scores(dataset))
    }

    /// Groups features by ascending `scores`. The lower half (rounded up) is the
    /// dissimilar pool. Ties keep feature order.
    pub fn from_scores(scores: &[f64]) -> Self {
        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]).then(a.cmp(&b)));

        let split = (scores.len() + 1) / 2;
        let similar = order.split_off(split);

        Self {
            dissimilar: order,
            similar,
        }
    }

    pub fn dissimilar(&self) -> &[usize] {
        &self.dissimilar
    }

    pub fn similar(&self) -> &[usize] {
        &self.similar
    }

    pub fn num_features(&self) -> usize {
        self.dissimilar.len() + self.similar.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn correlated() -> Dataset {
        // Features 0 and 1 move together, feature 2 is unrelated.
        Dataset::new(
            vec![
                vec![1.0, 2.0, 5.0],
                vec![2.0, 4.1, 1.0],
                vec![3.0, 6.0, 4.0],
                vec![4.0, 8.2, 2.0],
            ],
            vec![0, 1, 0, 1],
        )
        .unwrap()
    }

    #[test]
    fn test_pearson_detects_linear_relationship() {
        let m = absolute_pearson(&correlated());
        assert!(m.get(0, 1) > 0.99);
        assert!(m.get(0, 2) < m.get(0, 1));
        assert!(m.values().iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_constant_column_has_zero_similarity() {
        let data = Dataset::new(vec![vec![0.0, 1.0], vec![0.0, 2.0]], vec![0, 1]).unwrap();
        assert_eq!(absolute_cosine(&data).get(0, 1), 0.0);
        assert_eq!(absolute_pearson(&data).get(0, 1), 0.0);
    }

    #[test]
    fn test_groups_put_least_correlated_first() {
        let groups = FeatureGroups::from_correlation(&correlated());
        assert_eq!(groups.dissimilar()[0], 2);
        assert_eq!(groups.dissimilar().len(), 2);
        assert_eq!(groups.similar().len(), 1);
        assert_eq!(groups.num_features(), 3);
    }

    #[test]
    fn test_groups_from_scores_ties_keep_order() {
        let groups = FeatureGroups::from_scores(&[0.5, 0.1, 0.5, 0.9]);
        assert_eq!(groups.dissimilar(), &[1, 0]);
        assert_eq!(groups.similar(), &[2, 3]);
    }
}
