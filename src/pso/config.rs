use crate::dataset::Dataset;
use crate::error::{Result, SearchError};
use crate::search::options::{check_non_negative, check_rate};
use crate::search::SearchConfig;

/// Which particle swarm optimizer to run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PsoVariant {
    /// Binary PSO: a gene is set with probability `sigmoid(velocity)`.
    #[default]
    Binary,
    /// Continuous PSO: positions are clamped and thresholded into a mask.
    Continuous,
    /// PSO(4-2): continuous updates, a small-subset biased initial swarm, and ties
    /// between bests broken toward the smaller subset.
    FourTwo,
    /// Binary PSO followed by correlation-based local search (HPSO-LS).
    HybridLocalSearch,
}

impl PsoVariant {
    /// Whether positions are real values thresholded into a mask.
    pub fn is_continuous(self) -> bool {
        matches!(self, PsoVariant::Continuous | PsoVariant::FourTwo)
    }
}

/// Configuration of a [`ParticleSwarmSearch`](super::ParticleSwarmSearch).
///
/// # Example
///
/// ```rust
/// use featsel::pso::{PsoConfig, PsoVariant};
///
/// let binary = PsoConfig::builder().build();
/// assert_eq!(binary.max_velocity(), 6.0);
///
/// // Continuous variants default to a velocity limit that fits the unit interval.
/// let continuous = PsoConfig::builder().variant(PsoVariant::FourTwo).build();
/// assert_eq!(continuous.max_velocity(), 0.6);
/// assert_eq!(continuous.threshold(), 0.6);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PsoConfig {
    search: SearchConfig,
    variant: PsoVariant,
    inertia: f64,
    cognitive: f64,
    social: f64,
    min_velocity: f64,
    max_velocity: f64,
    min_position: f64,
    max_position: f64,
    threshold: f64,
    local_search_alpha: f64,
    subset_size_ratio: f64,
}

impl PsoConfig {
    pub fn search(&self) -> &SearchConfig {
        &self.search
    }

    pub fn variant(&self) -> PsoVariant {
        self.variant
    }

    /// Inertia weight `w`.
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    /// Acceleration toward the personal best, `c1`.
    pub fn cognitive(&self) -> f64 {
        self.cognitive
    }

    /// Acceleration toward the global best, `c2`.
    pub fn social(&self) -> f64 {
        self.social
    }

    pub fn min_velocity(&self) -> f64 {
        self.min_velocity
    }

    pub fn max_velocity(&self) -> f64 {
        self.max_velocity
    }

    pub fn min_position(&self) -> f64 {
        self.min_position
    }

    pub fn max_position(&self) -> f64 {
        self.max_position
    }

    /// Position above which a continuous particle selects a feature (θ).
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn local_search_alpha(&self) -> f64 {
        self.local_search_alpha
    }

    pub fn subset_size_ratio(&self) -> f64 {
        self.subset_size_ratio
    }

    /// Checks the configuration against `dataset`.
    pub fn validate(&self, dataset: &Dataset) -> Result<()> {
        self.search.validate(dataset)?;

        if !self.inertia.is_finite() {
            return Err(SearchError::Configuration(format!(
                "Inertia weight must be finite, got {}",
                self.inertia
            )));
        }
        check_non_negative("Cognitive coefficient", self.cognitive)?;
        check_non_negative("Social coefficient", self.social)?;

        if !(self.min_velocity < self.max_velocity) {
            return Err(SearchError::Configuration(format!(
                "Velocity bounds must be ordered, got [{}, {}]",
                self.min_velocity, self.max_velocity
            )));
        }
        if !(self.min_position < self.max_position) {
            return Err(SearchError::Configuration(format!(
                "Position bounds must be ordered, got [{}, {}]",
                self.min_position, self.max_position
            )));
        }
        // A threshold on either bound leaves one side of the mask unreachable.
        if self.variant.is_continuous()
            && !(self.min_position < self.threshold && self.threshold < self.max_position)
        {
            return Err(SearchError::Configuration(format!(
                "Threshold {} must lie strictly inside the position bounds ({}, {})",
                self.threshold, self.min_position, self.max_position
            )));
        }

        check_rate("Local search alpha", self.local_search_alpha)?;
        check_rate("Subset size ratio", self.subset_size_ratio)?;
        Ok(())
    }

    pub fn builder() -> PsoConfigBuilder {
        PsoConfigBuilder::default()
    }
}

impl Default for PsoConfig {
    fn default() -> Self {
        PsoConfigBuilder::default().build()
    }
}

/// Builder for `PsoConfig`.
#[derive(Debug, Clone, Default)]
pub struct PsoConfigBuilder {
    search: Option<SearchConfig>,
    variant: Option<PsoVariant>,
    inertia: Option<f64>,
    cognitive: Option<f64>,
    social: Option<f64>,
    min_velocity: Option<f64>,
    max_velocity: Option<f64>,
    min_position: Option<f64>,
    max_position: Option<f64>,
    threshold: Option<f64>,
    local_search_alpha: Option<f64>,
    subset_size_ratio: Option<f64>,
}

impl PsoConfigBuilder {
    pub fn search(mut self, value: SearchConfig) -> Self {
        self.search = Some(value);
        self
    }

    pub fn variant(mut self, value: PsoVariant) -> Self {
        self.variant = Some(value);
        self
    }

    pub fn inertia(mut self, value: f64) -> Self {
        self.inertia = Some(value);
        self
    }

    pub fn cognitive(mut self, value: f64) -> Self {
        self.cognitive = Some(value);
        self
    }

    pub fn social(mut self, value: f64) -> Self {
        self.social = Some(value);
        self
    }

    /// Sets both velocity bounds.
    pub fn velocity_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_velocity = Some(min);
        self.max_velocity = Some(max);
        self
    }

    /// Sets both position bounds.
    pub fn position_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_position = Some(min);
        self.max_position = Some(max);
        self
    }

    pub fn threshold(mut self, value: f64) -> Self {
        self.threshold = Some(value);
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

    /// Builds the `PsoConfig` instance.
    ///
    /// Defaults: binary PSO, `w = 0.7298`, `c1 = c2 = 1.49618`, positions in
    /// `[0, 1]` with threshold 0.6, local search alpha 0.65 and subset size ratio
    /// 0.3. Velocities are bounded by ±6 for the binary variants and ±0.6 for the
    /// continuous ones.
    pub fn build(self) -> PsoConfig {
        let variant = self.variant.unwrap_or_default();
        let velocity_limit = if variant.is_continuous() { 0.6 } else { 6.0 };

        PsoConfig {
            search: self.search.unwrap_or_default(),
            variant,
            inertia: self.inertia.unwrap_or(0.7298),
            cognitive: self.cognitive.unwrap_or(1.49618),
            social: self.social.unwrap_or(1.49618),
            min_velocity: self.min_velocity.unwrap_or(-velocity_limit),
            max_velocity: self.max_velocity.unwrap_or(velocity_limit),
            min_position: self.min_position.unwrap_or(0.0),
            max_position: self.max_position.unwrap_or(1.0),
            threshold: self.threshold.unwrap_or(0.6),
            local_search_alpha: self.local_search_alpha.unwrap_or(0.65),
            subset_size_ratio: self.subset_size_ratio.unwrap_or(0.3),
        }
    }
}
