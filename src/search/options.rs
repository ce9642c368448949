//! # SearchConfig
//!
//! The `SearchConfig` struct holds the settings every engine family shares: how
//! many candidates live in a generation, how many generations run, how many folds
//! the evaluator cross-validates with, the optional RNG seed and the population
//! size from which fitness evaluation switches to parallel.
//!
//! ## Example
//!
//! ```rust
//! use featsel::search::SearchConfig;
//!
//! let config = SearchConfig::builder()
//!     .population_size(30)
//!     .max_iterations(40)
//!     .k_folds(5)
//!     .seed(42)
//!     .build();
//!
//! assert_eq!(config.population_size(), 30);
//! assert_eq!(config.seed(), Some(42));
//!
//! // Unset fields fall back to their defaults.
//! assert_eq!(config.parallel_threshold(), 1000);
//! ```

use crate::dataset::Dataset;
use crate::error::{Result, SearchError};

/// Settings shared by every search engine. Immutable once built.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    population_size: usize,
    max_iterations: usize,
    k_folds: usize,
    seed: Option<u64>,
    /// Minimum population size evaluated in parallel
    parallel_threshold: usize,
}

impl SearchConfig {
    pub fn new(population_size: usize, max_iterations: usize, k_folds: usize) -> Self {
        Self {
            population_size,
            max_iterations,
            k_folds,
            seed: None,
            parallel_threshold: 1000,
        }
    }

    /// Number of individuals, particles or ants per generation.
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Exact number of generations a run performs.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn k_folds(&self) -> usize {
        self.k_folds
    }

    /// RNG seed. `None` seeds from system entropy.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Checks the settings against `dataset`.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Configuration` if the fold count is outside
    /// `[2, samples]`, the population size is outside `[1, features]` or the
    /// iteration budget is zero.
    pub fn validate(&self, dataset: &Dataset) -> Result<()> {
        if self.k_folds < 2 {
            return Err(SearchError::Configuration(format!(
                "Fold count must be at least 2, got {}",
                self.k_folds
            )));
        }
        if self.k_folds > dataset.num_samples() {
            return Err(SearchError::Configuration(format!(
                "Fold count ({}) exceeds the number of samples ({})",
                self.k_folds,
                dataset.num_samples()
            )));
        }
        if self.population_size == 0 {
            return Err(SearchError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }
        if self.population_size > dataset.num_features() {
            return Err(SearchError::Configuration(format!(
                "Population size ({}) exceeds the number of features ({})",
                self.population_size,
                dataset.num_features()
            )));
        }
        if self.max_iterations == 0 {
            return Err(SearchError::Configuration(
                "Number of iterations cannot be zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns a builder for creating a `SearchConfig` instance.
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::default()
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfigBuilder::default().build()
    }
}

/// Builder for `SearchConfig`.
#[derive(Debug, Clone, Default)]
pub struct SearchConfigBuilder {
    population_size: Option<usize>,
    max_iterations: Option<usize>,
    k_folds: Option<usize>,
    seed: Option<u64>,
    parallel_threshold: Option<usize>,
}

impl SearchConfigBuilder {
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn max_iterations(mut self, value: usize) -> Self {
        self.max_iterations = Some(value);
        self
    }

    pub fn k_folds(mut self, value: usize) -> Self {
        self.k_folds = Some(value);
        self
    }

    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Builds the `SearchConfig` instance.
    ///
    /// Defaults: 20 candidates, 50 iterations, 10 folds, entropy seeding and a
    /// parallel threshold of 1000.
    pub fn build(self) -> SearchConfig {
        SearchConfig {
            population_size: self.population_size.unwrap_or(20),
            max_iterations: self.max_iterations.unwrap_or(50),
            k_folds: self.k_folds.unwrap_or(10),
            seed: self.seed,
            parallel_threshold: self.parallel_threshold.unwrap_or(1000),
        }
    }
}

/// Checks that `value` is a probability.
pub(crate) fn check_rate(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SearchError::Configuration(format!(
            "{} must be in [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}

/// Checks that `value` is finite and non-negative.
pub(crate) fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SearchError::Configuration(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )));
    }
    Ok(())
}
