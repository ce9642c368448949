use crate::dataset::Dataset;
use crate::error::{Result, SearchError};
use crate::search::options::{check_non_negative, check_rate};
use crate::search::SearchConfig;

/// Which ant colony optimizer to run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcoVariant {
    /// Pair pheromone, heuristic `1 / similarity`, fixed subset size.
    #[default]
    Classic,
    /// Pair pheromone, heuristic `relevance / similarity`, fixed subset size.
    RelevanceRedundancy,
    /// Per-feature pheromone, heuristic `relevance`, ants grow until they stagnate.
    Optimal,
}

impl AcoVariant {
    /// Whether pheromone lives on feature pairs.
    pub fn is_graph_based(self) -> bool {
        !matches!(self, AcoVariant::Optimal)
    }
}

/// Configuration of an [`AntColonySearch`](super::AntColonySearch).
///
/// The population size of the embedded [`SearchConfig`] is the number of ants.
///
/// # Example
///
/// ```rust
/// use featsel::aco::{AcoConfig, AcoVariant};
///
/// let config = AcoConfig::builder()
///     .variant(AcoVariant::Optimal)
///     .rho(0.3)
///     .build();
///
/// assert_eq!(config.rho(), 0.3);
/// assert_eq!(config.stagnation_limit(), 10);
/// assert_eq!(config.subset_size_for(40), 20);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct AcoConfig {
    search: SearchConfig,
    variant: AcoVariant,
    alpha: f64,
    beta: f64,
    rho: f64,
    q0: f64,
    initial_pheromone: f64,
    subset_size: Option<usize>,
    phi: f64,
    fitness_scale: f64,
    stagnation_limit: usize,
}

impl AcoConfig {
    pub fn search(&self) -> &SearchConfig {
        &self.search
    }

    pub fn variant(&self) -> AcoVariant {
        self.variant
    }

    /// Weight of the pheromone in the transition score.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Weight of the heuristic in the transition score.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Evaporation rate.
    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Probability of the greedy transition rule.
    pub fn q0(&self) -> f64 {
        self.q0
    }

    pub fn initial_pheromone(&self) -> f64 {
        self.initial_pheromone
    }

    /// Explicit subset size of the graph-based variants, if one was set.
    pub fn subset_size(&self) -> Option<usize> {
        self.subset_size
    }

    /// Subset size the graph-based variants build for `num_features` features:
    /// the configured size, or half the features (at least one).
    pub fn subset_size_for(&self, num_features: usize) -> usize {
        self.subset_size.unwrap_or((num_features / 2).max(1))
    }

    /// Weight of accuracy against subset size in the Optimal ACO deposit.
    pub fn phi(&self) -> f64 {
        self.phi
    }

    /// Fitness value that maps to a full accuracy term in the Optimal ACO deposit.
    pub fn fitness_scale(&self) -> f64 {
        self.fitness_scale
    }

    /// Consecutive non-improving steps after which an Optimal ACO ant stops.
    pub fn stagnation_limit(&self) -> usize {
        self.stagnation_limit
    }

    /// Checks the configuration against `dataset`.
    pub fn validate(&self, dataset: &Dataset) -> Result<()> {
        self.search.validate(dataset)?;
        check_non_negative("Alpha", self.alpha)?;
        check_non_negative("Beta", self.beta)?;
        check_rate("Evaporation rate", self.rho)?;
        check_rate("Q0", self.q0)?;
        check_rate("Phi", self.phi)?;

        if !(self.initial_pheromone.is_finite() && self.initial_pheromone > 0.0) {
            return Err(SearchError::Configuration(format!(
                "Initial pheromone must be positive, got {}",
                self.initial_pheromone
            )));
        }
        if !(self.fitness_scale.is_finite() && self.fitness_scale > 0.0) {
            return Err(SearchError::Configuration(format!(
                "Fitness scale must be positive, got {}",
                self.fitness_scale
            )));
        }
        if let Some(size) = self.subset_size {
            if size == 0 || size > dataset.num_features() {
                return Err(SearchError::Configuration(format!(
                    "Subset size ({}) must be between 1 and the number of features ({})",
                    size,
                    dataset.num_features()
                )));
            }
        }
        if self.stagnation_limit == 0 {
            return Err(SearchError::Configuration(
                "Stagnation limit cannot be zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn builder() -> AcoConfigBuilder {
        AcoConfigBuilder::default()
    }
}

impl Default for AcoConfig {
    fn default() -> Self {
        AcoConfigBuilder::default().build()
    }
}

/// Builder for `AcoConfig`.
#[derive(Debug, Clone, Default)]
pub struct AcoConfigBuilder {
    search: Option<SearchConfig>,
    variant: Option<AcoVariant>,
    alpha: Option<f64>,
    beta: Option<f64>,
    rho: Option<f64>,
    q0: Option<f64>,
    initial_pheromone: Option<f64>,
    subset_size: Option<usize>,
    phi: Option<f64>,
    fitness_scale: Option<f64>,
    stagnation_limit: Option<usize>,
}

impl AcoConfigBuilder {
    pub fn search(mut self, value: SearchConfig) -> Self {
        self.search = Some(value);
        self
    }

    pub fn variant(mut self, value: AcoVariant) -> Self {
        self.variant = Some(value);
        self
    }

    pub fn alpha(mut self, value: f64) -> Self {
        self.alpha = Some(value);
        self
    }

    pub fn beta(mut self, value: f64) -> Self {
        self.beta = Some(value);
        self
    }

    pub fn rho(mut self, value: f64) -> Self {
        self.rho = Some(value);
        self
    }

    pub fn q0(mut self, value: f64) -> Self {
        self.q0 = Some(value);
        self
    }

    pub fn initial_pheromone(mut self, value: f64) -> Self {
        self.initial_pheromone = Some(value);
        self
    }

    pub fn subset_size(mut self, value: usize) -> Self {
        self.subset_size = Some(value);
        self
    }

    pub fn phi(mut self, value: f64) -> Self {
        self.phi = Some(value);
        self
    }

    pub fn fitness_scale(mut self, value: f64) -> Self {
        self.fitness_scale = Some(value);
        self
    }

    pub fn stagnation_limit(mut self, value: usize) -> Self {
        self.stagnation_limit = Some(value);
        self
    }

    /// Builds the `AcoConfig` instance.
    ///
    /// Defaults: classic variant, `α = 1`, `β = 1`, `ρ = 0.2`, `q0 = 0.7`, initial
    /// pheromone 1, subset size of half the features, `φ = 0.8`, fitness scale 100
    /// and a stagnation limit of 10 steps.
    pub fn build(self) -> AcoConfig {
        AcoConfig {
            search: self.search.unwrap_or_default(),
            variant: self.variant.unwrap_or_default(),
            alpha: self.alpha.unwrap_or(1.0),
            beta: self.beta.unwrap_or(1.0),
            rho: self.rho.unwrap_or(0.2),
            q0: self.q0.unwrap_or(0.7),
            initial_pheromone: self.initial_pheromone.unwrap_or(1.0),
            subset_size: self.subset_size,
            phi: self.phi.unwrap_or(0.8),
            fitness_scale: self.fitness_scale.unwrap_or(100.0),
            stagnation_limit: self.stagnation_limit.unwrap_or(10),
        }
    }
}
