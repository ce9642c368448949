//! # Fitness Evaluation
//!
//! The `FitnessEvaluator` trait is the boundary between the search engines and the
//! classifier that scores a feature subset. Implementations cross-validate some
//! classifier on the given features and report the resulting [`Criteria`]. Accuracy
//! is the fitness the engines maximize.
//!
//! Engines never call an evaluator with an empty subset; [`evaluate_subset`]
//! assigns such subsets a fitness of zero directly.
//!
//! ## Example
//!
//! ```rust
//! use featsel::error::Result;
//! use featsel::evaluation::{Criteria, EvaluationContext, FitnessEvaluator};
//! use std::path::Path;
//!
//! // Any closure with the right signature is an evaluator.
//! let evaluator = |features: &[usize], _ctx: &EvaluationContext<'_>| -> Result<Criteria> {
//!     Ok(Criteria::from_accuracy(50.0 + features.len() as f64))
//! };
//!
//! let ctx = EvaluationContext::new(Path::new("."), 5);
//! let criteria = evaluator.cross_validate(&[0, 3], &ctx).unwrap();
//! assert_eq!(criteria.error_rate, 48.0);
//! ```

pub mod caching;
pub mod folds;
pub mod workspace;

use std::path::Path;
use std::time::Duration;

use crate::error::{Result, SearchError};

pub use caching::{CachedEvaluator, ThreadLocalCachedEvaluator};
pub use folds::{assign_folds, folds_from_assignment, stratified_folds, Fold};
pub use workspace::TempWorkspace;

/// Quality measures of one cross-validated feature subset.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Criteria {
    /// Mean accuracy over the folds, in percent.
    pub accuracy: f64,
    /// Always `100 - accuracy`.
    pub error_rate: f64,
    /// Wall-clock time spent training and testing.
    pub execution_time: Duration,
}

impl Criteria {
    pub fn from_accuracy(accuracy: f64) -> Self {
        Self {
            accuracy,
            error_rate: 100.0 - accuracy,
            execution_time: Duration::ZERO,
        }
    }

    pub fn with_execution_time(mut self, execution_time: Duration) -> Self {
        self.execution_time = execution_time;
        self
    }
}

/// Per-call information handed to an evaluator.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    /// A scratch directory owned by the candidate being evaluated. No other
    /// concurrent evaluation writes to it.
    pub scratch_dir: &'a Path,
    /// Number of cross-validation folds.
    pub k_folds: usize,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(scratch_dir: &'a Path, k_folds: usize) -> Self {
        Self {
            scratch_dir,
            k_folds,
        }
    }
}

/// Scores a non-empty feature subset by cross-validating a classifier on it.
///
/// Implementations must be deterministic for a fixed fold assignment and
/// classifier configuration, and must be safe to call from several threads at
/// once as long as each call uses its own scratch directory.
pub trait FitnessEvaluator: Send + Sync {
    fn cross_validate(&self, features: &[usize], ctx: &EvaluationContext<'_>) -> Result<Criteria>;
}

impl<F> FitnessEvaluator for F
where
    F: Fn(&[usize], &EvaluationContext<'_>) -> Result<Criteria> + Send + Sync,
{
    fn cross_validate(&self, features: &[usize], ctx: &EvaluationContext<'_>) -> Result<Criteria> {
        self(features, ctx)
    }
}

/// Returns the fitness of `features`, or zero without consulting the evaluator when
/// the subset is empty.
///
/// # Errors
///
/// Propagates evaluator failures, and returns `SearchError::FitnessCalculation` if
/// the evaluator reports a non-finite accuracy.
pub fn evaluate_subset<E>(
    evaluator: &E,
    features: &[usize],
    ctx: &EvaluationContext<'_>,
) -> Result<f64>
where
    E: FitnessEvaluator + ?Sized,
{
    if features.is_empty() {
        return Ok(0.0);
    }

    let criteria = evaluator.cross_validate(features, ctx)?;
    if !criteria.accuracy.is_finite() {
        return Err(SearchError::FitnessCalculation(format!(
            "Non-finite accuracy {} for subset {:?}",
            criteria.accuracy, features
        )));
    }

    Ok(criteria.accuracy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_error_rate_complements_accuracy() {
        let criteria = Criteria::from_accuracy(87.5);
        assert_eq!(criteria.error_rate, 12.5);
        assert_eq!(criteria.execution_time, Duration::ZERO);
    }

    #[test]
    fn test_empty_subset_never_reaches_evaluator() {
        let calls = AtomicUsize::new(0);
        let evaluator = |_: &[usize], _: &EvaluationContext<'_>| -> Result<Criteria> {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Criteria::from_accuracy(99.0))
        };
        let ctx = EvaluationContext::new(Path::new("."), 3);

        assert_eq!(evaluate_subset(&evaluator, &[], &ctx).unwrap(), 0.0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert_eq!(evaluate_subset(&evaluator, &[1], &ctx).unwrap(), 99.0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_non_finite_accuracy_is_an_error() {
        let evaluator = |_: &[usize], _: &EvaluationContext<'_>| -> Result<Criteria> {
            Ok(Criteria::from_accuracy(f64::NAN))
        };
        let ctx = EvaluationContext::new(Path::new("."), 3);
        let result = evaluate_subset(&evaluator, &[0], &ctx);
        assert!(matches!(result, Err(SearchError::FitnessCalculation(_))));
    }

    #[test]
    fn test_evaluator_failure_propagates() {
        let evaluator = |_: &[usize], _: &EvaluationContext<'_>| -> Result<Criteria> {
            Err(SearchError::Evaluation("classifier crashed".to_string()))
        };
        let ctx = EvaluationContext::new(Path::new("."), 3);
        assert!(matches!(
            evaluate_subset(&evaluator, &[0], &ctx),
            Err(SearchError::Evaluation(_))
        ));
    }
}
