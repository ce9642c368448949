/// Summary of one completed generation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    pub generation: usize,
    /// Best fitness among the candidates evaluated in this generation.
    pub best_fitness: f64,
    pub mean_fitness: f64,
    /// Subset size of this generation's best candidate.
    pub best_subset_size: usize,
    /// Best fitness seen so far in the run.
    pub overall_best_fitness: f64,
    /// Evaluator calls made so far in the run.
    pub evaluations: usize,
}

/// The result of a search run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Feature indices of the best subset found, strictly increasing.
    pub selected_features: Vec<usize>,
    pub best_fitness: f64,
    /// Number of generations performed.
    pub generations: usize,
    /// Number of evaluator calls. Empty subsets are not counted.
    pub evaluations: usize,
    pub history: Vec<GenerationStats>,
}
