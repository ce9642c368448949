use crate::dataset::Dataset;

use super::RelevanceScorer;

/// Term variance: the population variance of each feature over all samples.
///
/// Class labels are ignored, so the score is purely unsupervised.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct TermVariance;

impl RelevanceScorer for TermVariance {
    fn raw_scores(&self, dataset: &Dataset) -> Vec<f64> {
        let m = dataset.num_samples() as f64;
        (0..dataset.num_features())
            .map(|feature| {
                let column = dataset.column(feature);
                let mean = column.iter().sum::<f64>() / m;
                column.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / m
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_variance_raw() {
        let data = Dataset::new(
            vec![vec![1.0, 0.0], vec![3.0, 0.0]],
            vec![0, 1],
        )
        .unwrap();
        let scores = TermVariance.raw_scores(&data);
        assert!((scores[0] - 1.0).abs() < 1e-12);
        assert_eq!(scores[1], 0.0);
    }

    #[test]
    fn test_term_variance_is_label_independent() {
        let samples = vec![vec![1.0, 2.0], vec![2.0, 7.0], vec![4.0, 1.0]];
        let a = Dataset::new(samples.clone(), vec![0, 0, 1]).unwrap();
        let b = Dataset::new(samples, vec![1, 2, 0]).unwrap();
        assert_eq!(TermVariance.relevance(&a), TermVariance.relevance(&b));
    }
}
