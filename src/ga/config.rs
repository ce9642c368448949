use crate::breeding::CrossoverKind;
use crate::dataset::Dataset;
use crate::error::{Result, SearchError};
use crate::search::options::check_rate;
use crate::search::SearchConfig;
use crate::selection::SelectionKind;

/// Which genetic algorithm to run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GaVariant {
    /// Selection, crossover, mutation and elitist replacement.
    #[default]
    Simple,
    /// Simple GA plus correlation-based local search on every offspring (HGAFS).
    Hybrid,
}

/// Configuration of a [`GeneticSearch`](super::GeneticSearch).
///
/// # Example
///
/// ```rust
/// use featsel::ga::{GaConfig, GaVariant};
/// use featsel::breeding::CrossoverKind;
/// use featsel::search::SearchConfig;
/// use featsel::selection::SelectionKind;
///
/// let config = GaConfig::builder()
///     .search(SearchConfig::builder().population_size(10).max_iterations(20).build())
///     .variant(GaVariant::Hybrid)
///     .selection(SelectionKind::RankBased)
///     .crossover(CrossoverKind::TwoPoint)
///     .crossover_rate(0.9)
///     .build();
///
/// assert_eq!(config.crossover_rate(), 0.9);
/// assert_eq!(config.mutation_rate(), 0.01);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GaConfig {
    search: SearchConfig,
    variant: GaVariant,
    selection: SelectionKind,
    crossover: CrossoverKind,
    crossover_rate: f64,
    mutation_rate: f64,
    elitism: usize,
    local_search_alpha: f64,
    subset_size_ratio: f64,
}

impl GaConfig {
    pub fn search(&self) -> &SearchConfig {
        &self.search
    }

    pub fn variant(&self) -> GaVariant {
        self.variant
    }

    pub fn selection(&self) -> SelectionKind {
        self.selection
    }

    pub fn crossover(&self) -> CrossoverKind {
        self.crossover
    }

    /// Probability that a pair of parents recombines (per gene for uniform
    /// crossover).
    pub fn crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    /// Probability that a gene flips.
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Number of best individuals copied unchanged into the next generation.
    pub fn elitism(&self) -> usize {
        self.elitism
    }

    /// Share of dissimilar features the hybrid local search aims for.
    pub fn local_search_alpha(&self) -> f64 {
        self.local_search_alpha
    }

    /// Largest target subset size of the hybrid variant, as a share of all features.
    pub fn subset_size_ratio(&self) -> f64 {
        self.subset_size_ratio
    }

    /// Checks the configuration against `dataset`.
    pub fn validate(&self, dataset: &Dataset) -> Result<()> {
        self.search.validate(dataset)?;
        check_rate("Crossover rate", self.crossover_rate)?;
        check_rate("Mutation rate", self.mutation_rate)?;
        check_rate("Local search alpha", self.local_search_alpha)?;
        check_rate("Subset size ratio", self.subset_size_ratio)?;
        if self.elitism > self.search.population_size() {
            return Err(SearchError::Configuration(format!(
                "Elitism ({}) exceeds the population size ({})",
                self.elitism,
                self.search.population_size()
            )));
        }
        Ok(())
    }

    pub fn builder() -> GaConfigBuilder {
        GaConfigBuilder::default()
    }
}

impl Default for GaConfig {
    fn default() -> Self {
        GaConfigBuilder::default().build()
    }
}

/// Builder for `GaConfig`.
#[derive(Debug, Clone, Default)]
pub struct GaConfigBuilder {
    search: Option<SearchConfig>,
    variant: Option<GaVariant>,
    selection: Option<SelectionKind>,
    crossover: Option<CrossoverKind>,
    crossover_rate: Option<f64>,
    mutation_rate: Option<f64>,
    elitism: Option<usize>,
    local_search_alpha: Option<f64>,
    subset_size_ratio: Option<f64>,
}

impl GaConfigBuilder {
    pub fn search(mut self, value: SearchConfig) -> Self {
        self.search = Some(value);
        self
    }

    pub fn variant(mut self, value: GaVariant) -> Self {
        self.variant = Some(value);
        self
    }

    pub fn selection(mut self, value: SelectionKind) -> Self {
        self.selection = Some(value);
        self
    }

    pub fn crossover(mut self, value: CrossoverKind) -> Self {
        self.crossover = Some(value);
        self
    }

    pub fn crossover_rate(mut self, value: f64) -> Self {
        self.crossover_rate = Some(value);
        self
    }

    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }

    pub fn elitism(mut self, value: usize) -> Self {
        self.elitism = Some(value);
        self
    }

    pub fn local_search_alpha(mut self, value: f64) -> Self {
        self.local_search_alpha = Some(value);
        self
    }

    pub fn subset_size_ratio(mut self, value: f64) -> Self {
        self.subset_size_ratio = Some(value);
        self
    }

    /// Builds the `GaConfig` instance.
    ///
    /// Defaults: simple GA, fitness-proportional selection, one-point crossover at
    /// rate 0.8, mutation rate 0.01, elitism 1, local search alpha 0.65 and subset
    /// size ratio 0.3.
    pub fn build(self) -> GaConfig {
        GaConfig {
            search: self.search.unwrap_or_default(),
            variant: self.variant.unwrap_or_default(),
            selection: self.selection.unwrap_or_default(),
            crossover: self.crossover.unwrap_or_default(),
            crossover_rate: self.crossover_rate.unwrap_or(0.8),
            mutation_rate: self.mutation_rate.unwrap_or(0.01),
            elitism: self.elitism.unwrap_or(1),
            local_search_alpha: self.local_search_alpha.unwrap_or(0.65),
            subset_size_ratio: self.subset_size_ratio.unwrap_or(0.3),
        }
    }
}
