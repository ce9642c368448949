//! # Relevance Scoring
//!
//! Relevance is a subset-independent informativeness score per feature. Search
//! engines use it as heuristic desirability: the ant colony state-transition rule
//! weighs candidate features by it, and the correlation-based local search groups
//! features by how strongly they correlate with the rest of the feature space.
//!
//! Raw scores are squashed into `(0, 1)` by [`normalize_relevance`], so values are
//! stable across runs on the same dataset.
//!
//! ## Example
//!
//! ```rust
//! use featsel::dataset::Dataset;
//! use featsel::relevance::{RelevanceScorer, TermVariance};
//!
//! let data = Dataset::new(
//!     vec![vec![0.0, 1.0], vec![10.0, 1.0], vec![5.0, 1.0]],
//!     vec![0, 1, 0],
//! ).unwrap();
//!
//! let relevance = TermVariance.relevance(&data);
//! assert!(relevance[0] > relevance[1]);
//! assert!(relevance.iter().all(|&r| r > 0.0 && r < 1.0));
//! ```

pub mod similarity;
pub mod term_variance;

use tracing::trace;

use crate::dataset::Dataset;

pub use similarity::{absolute_cosine, absolute_pearson, CorrelationToOthers, FeatureGroups};
pub use term_variance::TermVariance;

/// Replacement for zero denominators in relevance and similarity computations.
pub const NUMERIC_EPSILON: f64 = 1e-4;

/// Computes one relevance value per feature of a dataset.
pub trait RelevanceScorer: Send + Sync {
    /// Unnormalized per-feature scores.
    fn raw_scores(&self, dataset: &Dataset) -> Vec<f64>;

    /// Per-feature scores normalized into `(0, 1)`.
    fn relevance(&self, dataset: &Dataset) -> Vec<f64> {
        normalize_relevance(&self.raw_scores(dataset))
    }
}

#[inline]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Squashes raw scores into `(0, 1)`.
///
/// With `mean` the average score and `std` the sample standard deviation, every
/// value becomes `sigmoid((v - mean) / (std * control))` where
/// `control = mean / std`. A zero `std` or `control` is replaced by
/// [`NUMERIC_EPSILON`].
pub fn normalize_relevance(raw: &[f64]) -> Vec<f64> {
    let n = raw.len();
    if n == 0 {
        return Vec::new();
    }

    let mean = raw.iter().sum::<f64>() / n as f64;
    let squared: f64 = raw.iter().map(|v| (v - mean).powi(2)).sum();

    let mut std = if n > 1 {
        (squared / (n - 1) as f64).sqrt()
    } else {
        0.0
    };
    if std == 0.0 || !std.is_finite() {
        trace!("zero spread in relevance scores, substituting epsilon");
        std = NUMERIC_EPSILON;
    }

    let mut control = mean / std;
    if control == 0.0 || !control.is_finite() {
        trace!("zero relevance control factor, substituting epsilon");
        control = NUMERIC_EPSILON;
    }

    raw.iter()
        .map(|v| sigmoid((v - mean) / (std * control)))
        .collect()
}
