//! # Recursive Feature Elimination
//!
//! A single-trajectory baseline for the population-based engines. A linear model is
//! fitted on the remaining features, the feature whose weight has the smallest
//! square is dropped, and the process repeats until `target_size` features remain.
//! The final subset is scored with the same [`FitnessEvaluator`] the other engines
//! use, so outcomes are directly comparable.
//!
//! ## Example
//!
//! ```rust
//! use featsel::dataset::Dataset;
//! use featsel::error::Result;
//! use featsel::evaluation::{Criteria, EvaluationContext};
//! use featsel::rfe::{LinearWeightModel, RecursiveElimination, RfeConfig};
//!
//! /// Weighs every feature by its index.
//! struct IndexWeights;
//!
//! impl LinearWeightModel for IndexWeights {
//!     fn fit_weights(&self, features: &[usize], _ctx: &EvaluationContext<'_>) -> Result<Vec<f64>> {
//!         Ok(features.iter().map(|&f| f as f64).collect())
//!     }
//! }
//!
//! let dataset = Dataset::new(
//!     vec![vec![1.0, 2.0, 3.0, 4.0], vec![4.0, 3.0, 2.0, 1.0], vec![0.0, 1.0, 0.0, 1.0]],
//!     vec![0, 1, 0],
//! )
//! .unwrap();
//!
//! let config = RfeConfig::builder().target_size(2).k_folds(2).build();
//! let rfe = RecursiveElimination::configure(config, &dataset).unwrap();
//!
//! let evaluator = |features: &[usize], _ctx: &EvaluationContext<'_>| -> Result<Criteria> {
//!     Ok(Criteria::from_accuracy(50.0 + features.len() as f64))
//! };
//! let outcome = rfe.run(&IndexWeights, &evaluator).unwrap();
//!
//! assert_eq!(outcome.selected_features, vec![2, 3]);
//! assert_eq!(outcome.eliminated, vec![0, 1]);
//! assert_eq!(outcome.fitness, 52.0);
//! ```

use tracing::{debug, info};

use crate::dataset::Dataset;
use crate::error::{OptionExt, Result, SearchError};
use crate::evaluation::{evaluate_subset, EvaluationContext, FitnessEvaluator, TempWorkspace};

/// A linear classifier that exposes one weight per feature after training.
pub trait LinearWeightModel: Send + Sync {
    /// Trains on `features` and returns their weights, in the same order.
    fn fit_weights(&self, features: &[usize], ctx: &EvaluationContext<'_>) -> Result<Vec<f64>>;

    /// Whether the model can be trained on more than two classes.
    fn supports_multiclass(&self) -> bool {
        true
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RfeConfig {
    target_size: usize,
    k_folds: usize,
}

impl RfeConfig {
    /// Number of features left when elimination stops. Defaults to 1.
    pub fn target_size(&self) -> usize {
        self.target_size
    }

    /// Defaults to 10.
    pub fn k_folds(&self) -> usize {
        self.k_folds
    }

    pub fn validate(&self, dataset: &Dataset) -> Result<()> {
        if self.target_size == 0 || self.target_size > dataset.num_features() {
            return Err(SearchError::Configuration(format!(
                "Target size ({}) must be between 1 and the number of features ({})",
                self.target_size,
                dataset.num_features()
            )));
        }
        if self.k_folds < 2 || self.k_folds > dataset.num_samples() {
            return Err(SearchError::Configuration(format!(
                "Fold count ({}) must be between 2 and the number of samples ({})",
                self.k_folds,
                dataset.num_samples()
            )));
        }
        Ok(())
    }

    pub fn builder() -> RfeConfigBuilder {
        RfeConfigBuilder::default()
    }
}

impl Default for RfeConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RfeConfigBuilder {
    target_size: Option<usize>,
    k_folds: Option<usize>,
}

impl RfeConfigBuilder {
    pub fn target_size(mut self, value: usize) -> Self {
        self.target_size = Some(value);
        self
    }

    pub fn k_folds(mut self, value: usize) -> Self {
        self.k_folds = Some(value);
        self
    }

    pub fn build(self) -> RfeConfig {
        RfeConfig {
            target_size: self.target_size.unwrap_or(1),
            k_folds: self.k_folds.unwrap_or(10),
        }
    }
}

/// Result of a recursive elimination run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RfeOutcome {
    /// Surviving features, ascending.
    pub selected_features: Vec<usize>,
    /// Features in the order they were dropped.
    pub eliminated: Vec<usize>,
    /// Fitness of the surviving subset.
    pub fitness: f64,
}

#[derive(Debug, Clone)]
pub struct RecursiveElimination {
    config: RfeConfig,
    num_features: usize,
    num_classes: usize,
}

impl RecursiveElimination {
    /// # Errors
    ///
    /// Returns `SearchError::Configuration` if the configuration doesn't fit the
    /// dataset.
    pub fn configure(config: RfeConfig, dataset: &Dataset) -> Result<Self> {
        config.validate(dataset)?;
        Ok(Self {
            config,
            num_features: dataset.num_features(),
            num_classes: dataset.num_classes(),
        })
    }

    pub fn config(&self) -> &RfeConfig {
        &self.config
    }

    /// Eliminates features one at a time, then scores the survivors.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Configuration` if `model` is binary-only and the
    /// dataset has more than two classes, `SearchError::Evaluation` if the model
    /// returns the wrong number of weights, and propagates model, evaluator and
    /// workspace failures.
    pub fn run<M, E>(&self, model: &M, evaluator: &E) -> Result<RfeOutcome>
    where
        M: LinearWeightModel + ?Sized,
        E: FitnessEvaluator + ?Sized,
    {
        if self.num_classes > 2 && !model.supports_multiclass() {
            return Err(SearchError::Configuration(format!(
                "Model only supports binary problems, dataset has {} classes",
                self.num_classes
            )));
        }

        let workspace = TempWorkspace::create(1)?;
        let ctx = EvaluationContext::new(workspace.slot_dir(0), self.config.k_folds());

        info!(
            features = self.num_features,
            target = self.config.target_size(),
            "starting recursive elimination"
        );

        let mut remaining: Vec<usize> = (0..self.num_features).collect();
        let mut eliminated = Vec::with_capacity(self.num_features - self.config.target_size());

        while remaining.len() > self.config.target_size() {
            let weights = model.fit_weights(&remaining, &ctx)?;
            if weights.len() != remaining.len() {
                return Err(SearchError::Evaluation(format!(
                    "Model returned {} weights for {} features",
                    weights.len(),
                    remaining.len()
                )));
            }

            let weakest = weights
                .iter()
                .map(|w| w * w)
                .enumerate()
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(position, _)| position)
                .ok_or_else_search(|| SearchError::EmptyPopulation)?;

            let feature = remaining.remove(weakest);
            debug!(feature, remaining = remaining.len(), "feature eliminated");
            eliminated.push(feature);
        }

        let fitness = evaluate_subset(evaluator, &remaining, &ctx)?;
        workspace.close()?;

        info!(fitness, subset_size = remaining.len(), "recursive elimination finished");

        Ok(RfeOutcome {
            selected_features: remaining,
            eliminated,
            fitness,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::Criteria;
    use std::sync::Mutex;

    /// Returns fixed weights for the features it is asked about.
    struct FixedWeights {
        weights: Vec<f64>,
        binary_only: bool,
    }

    impl LinearWeightModel for FixedWeights {
        fn fit_weights(&self, features: &[usize], _ctx: &EvaluationContext<'_>) -> Result<Vec<f64>> {
            Ok(features.iter().map(|&f| self.weights[f]).collect())
        }

        fn supports_multiclass(&self) -> bool {
            !self.binary_only
        }
    }

    fn dataset(labels: Vec<usize>) -> Dataset {
        let rows = (0..labels.len())
            .map(|i| (0..5).map(|j| (i * 5 + j) as f64).collect())
            .collect();
        Dataset::new(rows, labels).unwrap()
    }

    fn accuracy_by_size(features: &[usize], _ctx: &EvaluationContext<'_>) -> Result<Criteria> {
        Ok(Criteria::from_accuracy(10.0 * features.len() as f64))
    }

    #[test]
    fn test_smallest_squared_weight_goes_first() {
        let model = FixedWeights {
            weights: vec![0.5, -3.0, 0.1, 2.0, -0.2],
            binary_only: false,
        };
        let config = RfeConfig::builder().target_size(2).k_folds(2).build();
        let rfe = RecursiveElimination::configure(config, &dataset(vec![0, 1, 0, 1])).unwrap();

        let outcome = rfe.run(&model, &accuracy_by_size).unwrap();
        assert_eq!(outcome.eliminated, vec![2, 4, 0]);
        assert_eq!(outcome.selected_features, vec![1, 3]);
        assert_eq!(outcome.fitness, 20.0);
    }

    #[test]
    fn test_evaluator_sees_only_the_survivors() {
        let seen = Mutex::new(Vec::new());
        let recording = |features: &[usize], _ctx: &EvaluationContext<'_>| -> Result<Criteria> {
            seen.lock().unwrap().push(features.to_vec());
            Ok(Criteria::from_accuracy(75.0))
        };
        let model = FixedWeights {
            weights: vec![5.0, 4.0, 3.0, 2.0, 1.0],
            binary_only: false,
        };
        let config = RfeConfig::builder().target_size(3).k_folds(2).build();
        let rfe = RecursiveElimination::configure(config, &dataset(vec![0, 1, 0, 1])).unwrap();

        rfe.run(&model, &recording).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_target_equal_to_feature_count_eliminates_nothing() {
        let model = FixedWeights {
            weights: vec![1.0; 5],
            binary_only: false,
        };
        let config = RfeConfig::builder().target_size(5).k_folds(2).build();
        let rfe = RecursiveElimination::configure(config, &dataset(vec![0, 1, 0, 1])).unwrap();

        let outcome = rfe.run(&model, &accuracy_by_size).unwrap();
        assert!(outcome.eliminated.is_empty());
        assert_eq!(outcome.selected_features, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_binary_model_rejects_multiclass_dataset() {
        let model = FixedWeights {
            weights: vec![1.0; 5],
            binary_only: true,
        };
        let config = RfeConfig::builder().target_size(2).k_folds(2).build();
        let rfe = RecursiveElimination::configure(config, &dataset(vec![0, 1, 2, 1])).unwrap();

        let result = rfe.run(&model, &accuracy_by_size);
        assert!(matches!(result, Err(SearchError::Configuration(_))));
    }

    #[test]
    fn test_weight_count_mismatch_is_an_evaluation_error() {
        struct Short;
        impl LinearWeightModel for Short {
            fn fit_weights(&self, _features: &[usize], _ctx: &EvaluationContext<'_>) -> Result<Vec<f64>> {
                Ok(vec![1.0])
            }
        }

        let config = RfeConfig::builder().target_size(2).k_folds(2).build();
        let rfe = RecursiveElimination::configure(config, &dataset(vec![0, 1, 0, 1])).unwrap();
        assert!(matches!(
            rfe.run(&Short, &accuracy_by_size),
            Err(SearchError::Evaluation(_))
        ));
    }

    #[test]
    fn test_invalid_configuration() {
        let data = dataset(vec![0, 1, 0, 1]);
        for config in [
            RfeConfig::builder().target_size(0).k_folds(2).build(),
            RfeConfig::builder().target_size(6).k_folds(2).build(),
            RfeConfig::builder().target_size(2).k_folds(5).build(),
        ] {
            assert!(matches!(
                RecursiveElimination::configure(config, &data),
                Err(SearchError::Configuration(_))
            ));
        }
    }
}
