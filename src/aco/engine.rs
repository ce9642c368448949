use tracing::trace;

use super::pheromone::{optimal_deposit, FeaturePheromone, PairPheromone, PheromoneMatrix};
use super::transition::{choose_next, classic_score, optimal_score, relevance_redundancy_score};
use super::{AcoConfig, AcoVariant};
use crate::candidate::Ant;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::evaluation::FitnessEvaluator;
use crate::matrix::SymmetricMatrix;
use crate::relevance::{absolute_cosine, RelevanceScorer, TermVariance};
use crate::rng::RandomNumberGenerator;
use crate::search::{
    run_search, CancellationToken, EvaluationScope, Metaheuristic, Population, SearchConfig,
    SearchOutcome,
};

/// State of an ACO run between generations.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ColonySnapshot {
    /// Generations completed so far.
    pub generation: usize,
    pub ants: Vec<Ant>,
    /// Raw pheromone values, per feature or packed per feature pair.
    pub pheromone: Vec<f64>,
}

#[derive(Debug, Clone)]
enum Pheromone {
    Pair(PairPheromone),
    Feature(FeaturePheromone),
}

impl Pheromone {
    fn as_matrix(&self) -> &dyn PheromoneMatrix {
        match self {
            Pheromone::Pair(pair) => pair,
            Pheromone::Feature(feature) => feature,
        }
    }
}

/// An ant colony optimizer for feature selection.
///
/// Graph-based variants lay pheromone on feature pairs: every ant starts on its own
/// random feature and walks a fixed number of steps, then the pheromone is updated
/// from the edges the colony walked. The Optimal variant lays pheromone on
/// features: ants keep adding features while their subset improves, are cut back to
/// their best prefix, and deposit pheromone weighted by accuracy and subset size.
///
/// # Example
///
/// ```rust
/// use featsel::aco::{AcoConfig, AcoVariant, AntColonySearch};
/// use featsel::dataset::Dataset;
/// use featsel::error::Result;
/// use featsel::evaluation::{Criteria, EvaluationContext};
/// use featsel::search::SearchConfig;
///
/// let dataset = Dataset::new(
///     (0..5).map(|i| (0..6).map(|j| ((i + 2) * (j + 1) % 7) as f64).collect()).collect(),
///     vec![0, 1, 0, 1, 1],
/// )
/// .unwrap();
///
/// let evaluator = |features: &[usize], _ctx: &EvaluationContext<'_>| -> Result<Criteria> {
///     Ok(Criteria::from_accuracy(100.0 - 10.0 * features.len() as f64))
/// };
///
/// let config = AcoConfig::builder()
///     .search(SearchConfig::builder().population_size(3).max_iterations(4).k_folds(2).seed(1).build())
///     .variant(AcoVariant::Optimal)
///     .stagnation_limit(2)
///     .build();
///
/// let mut colony = AntColonySearch::configure(config, &dataset).unwrap();
/// let outcome = colony.run(&evaluator).unwrap();
///
/// // Every extra feature costs accuracy, so the best subset is a single feature.
/// assert_eq!(outcome.selected_features.len(), 1);
/// assert_eq!(outcome.best_fitness, 90.0);
/// ```
#[derive(Debug)]
pub struct AntColonySearch {
    config: AcoConfig,
    num_features: usize,
    subset_size: usize,
    similarity: SymmetricMatrix,
    relevance: Vec<f64>,
    pheromone: Pheromone,
    edge_counter: SymmetricMatrix,
    colony: Population<Ant>,
    generation: usize,
    cancellation: CancellationToken,
}

impl AntColonySearch {
    /// Validates `config` against `dataset` and prepares the heuristic
    /// information: cosine similarity for the graph-based variants and
    /// term-variance relevance for the relevance-aware ones.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Configuration` if the configuration doesn't fit the
    /// dataset.
    pub fn configure(config: AcoConfig, dataset: &Dataset) -> Result<Self> {
        config.validate(dataset)?;
        let num_features = dataset.num_features();
        let variant = config.variant();

        let similarity = if variant.is_graph_based() {
            absolute_cosine(dataset)
        } else {
            SymmetricMatrix::new(0, 0.0)
        };
        let relevance = match variant {
            AcoVariant::Classic => Vec::new(),
            AcoVariant::RelevanceRedundancy | AcoVariant::Optimal => TermVariance.relevance(dataset),
        };
        let pheromone = Self::initial_pheromone(&config, num_features);
        let edge_counter = if variant.is_graph_based() {
            SymmetricMatrix::new(num_features, 0.0)
        } else {
            SymmetricMatrix::new(0, 0.0)
        };

        Ok(Self {
            subset_size: config.subset_size_for(num_features),
            config,
            num_features,
            similarity,
            relevance,
            pheromone,
            edge_counter,
            colony: Population::default(),
            generation: 0,
            cancellation: CancellationToken::new(),
        })
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn config(&self) -> &AcoConfig {
        &self.config
    }

    /// Runs the search to completion.
    pub fn run<E: FitnessEvaluator>(&mut self, evaluator: &E) -> Result<SearchOutcome> {
        let token = self.cancellation.clone();
        run_search(self, evaluator, &token)
    }

    pub fn pheromone(&self) -> &dyn PheromoneMatrix {
        self.pheromone.as_matrix()
    }

    /// Normalized relevance per feature. Empty for the classic variant.
    pub fn relevance(&self) -> &[f64] {
        &self.relevance
    }

    pub fn snapshot(&self) -> ColonySnapshot {
        ColonySnapshot {
            generation: self.generation,
            ants: self.colony.as_slice().to_vec(),
            pheromone: self.pheromone().values().to_vec(),
        }
    }

    fn initial_pheromone(config: &AcoConfig, num_features: usize) -> Pheromone {
        let initial = config.initial_pheromone();
        if config.variant().is_graph_based() {
            Pheromone::Pair(PairPheromone::new(num_features, initial))
        } else {
            Pheromone::Feature(FeaturePheromone::new(num_features, initial))
        }
    }

    fn score(&self, current: usize, next: usize) -> f64 {
        let (alpha, beta) = (self.config.alpha(), self.config.beta());
        match (&self.pheromone, self.config.variant()) {
            (Pheromone::Pair(tau), AcoVariant::Classic) => {
                classic_score(tau.get(current, next), self.similarity.get(current, next), alpha, beta)
            }
            (Pheromone::Pair(tau), _) => relevance_redundancy_score(
                tau.get(current, next),
                self.relevance[next],
                self.similarity.get(current, next),
                alpha,
                beta,
            ),
            (Pheromone::Feature(tau), _) => {
                optimal_score(tau.get(next), self.relevance[next], alpha, beta)
            }
        }
    }

    /// Moves ant `index` one step. Returns `false` if it had nowhere to go.
    fn step(&mut self, index: usize, rng: &mut RandomNumberGenerator) -> bool {
        let ant = &self.colony[index];
        let Some(current) = ant.current() else {
            return false;
        };
        let candidates: Vec<(usize, f64)> = ant
            .unvisited()
            .map(|next| (next, self.score(current, next)))
            .collect();

        match choose_next(&candidates, self.config.q0(), rng) {
            Some(next) => self.colony[index].visit(next),
            None => false,
        }
    }

    fn place_ants(&mut self, rng: &mut RandomNumberGenerator) {
        let starts = rng.sample_indices(self.num_features, self.colony.len());
        for (ant, start) in self.colony.iter_mut().zip(starts) {
            ant.reset();
            ant.visit(start);
        }
    }

    fn construct_paths(&mut self, scope: &EvaluationScope<'_>, rng: &mut RandomNumberGenerator) -> Result<()> {
        self.place_ants(rng);
        for _ in 1..self.subset_size {
            for index in 0..self.colony.len() {
                self.step(index, rng);
            }
        }

        scope.evaluate_candidates(self.colony.as_mut_slice())?;

        self.edge_counter.fill(0.0);
        for ant in self.colony.iter_mut() {
            ant.best_len = ant.features.len();
            for edge in ant.features.windows(2) {
                self.edge_counter.add(edge[0], edge[1], 1.0);
            }
        }
        Ok(())
    }

    fn construct_subsets(&mut self, scope: &EvaluationScope<'_>, rng: &mut RandomNumberGenerator) -> Result<()> {
        self.place_ants(rng);
        let limit = self.config.stagnation_limit();
        let mut active: Vec<usize> = (0..self.colony.len()).collect();

        while !active.is_empty() {
            let subsets: Vec<Vec<usize>> = active
                .iter()
                .map(|&index| self.colony[index].features.clone())
                .collect();
            let fitness = scope.evaluate_batch(&subsets)?;
            for (&index, fitness) in active.iter().zip(fitness) {
                self.colony[index].record_step(fitness);
            }

            active.retain(|&index| !self.colony[index].is_complete(limit));
            for &index in &active {
                self.step(index, rng);
            }
        }

        for ant in self.colony.iter_mut() {
            ant.truncate_to_best();
        }
        Ok(())
    }
}

impl Metaheuristic for AntColonySearch {
    type Candidate = Ant;

    fn name(&self) -> &'static str {
        match self.config.variant() {
            AcoVariant::Classic => "aco",
            AcoVariant::RelevanceRedundancy => "rr-aco",
            AcoVariant::Optimal => "optimal-aco",
        }
    }

    fn config(&self) -> &SearchConfig {
        self.config.search()
    }

    fn initialize(&mut self, _rng: &mut RandomNumberGenerator) -> Result<()> {
        let num_ants = self.config.search().population_size();
        self.colony = Population::new(vec![Ant::new(self.num_features); num_ants]);
        self.pheromone = Self::initial_pheromone(&self.config, self.num_features);
        self.generation = 0;
        Ok(())
    }

    fn evaluate(&mut self, scope: &EvaluationScope<'_>, rng: &mut RandomNumberGenerator) -> Result<()> {
        if self.config.variant().is_graph_based() {
            self.construct_paths(scope, rng)?;
        } else {
            self.construct_subsets(scope, rng)?;
        }
        self.generation += 1;
        Ok(())
    }

    fn operate(&mut self, _rng: &mut RandomNumberGenerator) -> Result<()> {
        let rho = self.config.rho();
        let num_ants = self.colony.len();

        match &mut self.pheromone {
            Pheromone::Pair(pheromone) => {
                pheromone.update_from_edges(rho, &self.edge_counter, num_ants, self.subset_size);
            }
            Pheromone::Feature(pheromone) => {
                let (phi, scale) = (self.config.phi(), self.config.fitness_scale());
                pheromone.evaporate(rho);

                for ant in self.colony.iter() {
                    let amount = optimal_deposit(ant.fitness, ant.features.len(), self.num_features, phi, scale);
                    pheromone.deposit(&ant.features, amount / num_ants as f64);
                }
                if let Some(best) = self.colony.best() {
                    let amount = optimal_deposit(best.fitness, best.features.len(), self.num_features, phi, scale);
                    pheromone.deposit(&best.features, amount);
                    trace!(fitness = best.fitness, size = best.features.len(), "best ant deposit");
                }
            }
        }
        Ok(())
    }

    fn candidates(&self) -> &[Ant] {
        self.colony.as_slice()
    }
}
