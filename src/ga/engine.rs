use tracing::trace;

use super::{GaConfig, GaVariant};
use crate::breeding::{crossover_pairs, BitwiseMutation, CrossoverOperator, MutationOperator};
use crate::candidate::{FeatureMask, Individual};
use crate::dataset::Dataset;
use crate::error::{Result, SearchError};
use crate::evaluation::FitnessEvaluator;
use crate::local_search::HybridLocalSearch;
use crate::rng::RandomNumberGenerator;
use crate::search::{
    run_search, CancellationToken, EvaluationScope, Metaheuristic, Population, SearchConfig,
    SearchOutcome,
};
use crate::selection::SelectionStrategy;

/// State of a GA run between generations.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationSnapshot {
    /// Generations completed so far.
    pub generation: usize,
    pub individuals: Vec<Individual>,
}

/// A genetic algorithm over boolean feature masks.
///
/// Each generation evaluates the population, draws a mating pool with the
/// configured selection strategy, recombines it pairwise, mutates every offspring
/// and, for the hybrid variant, pulls each offspring toward a correlation-balanced
/// subset. The `elitism` best parents survive unchanged.
///
/// # Example
///
/// ```rust
/// use featsel::dataset::Dataset;
/// use featsel::error::Result;
/// use featsel::evaluation::{Criteria, EvaluationContext};
/// use featsel::ga::{GaConfig, GeneticSearch};
/// use featsel::search::SearchConfig;
///
/// let dataset = Dataset::new(
///     (0..6).map(|i| (0..8).map(|j| ((i + 1) * (j + 2)) as f64).collect()).collect(),
///     vec![0, 1, 0, 1, 0, 1],
/// )
/// .unwrap();
///
/// // Reward subsets containing feature 3.
/// let evaluator = |features: &[usize], _ctx: &EvaluationContext<'_>| -> Result<Criteria> {
///     let bonus = if features.contains(&3) { 50.0 } else { 0.0 };
///     Ok(Criteria::from_accuracy(bonus + 10.0 / features.len() as f64))
/// };
///
/// let config = GaConfig::builder()
///     .search(SearchConfig::builder().population_size(6).max_iterations(5).k_folds(2).seed(3).build())
///     .build();
///
/// let mut search = GeneticSearch::configure(config, &dataset).unwrap();
/// let outcome = search.run(&evaluator).unwrap();
///
/// assert_eq!(outcome.generations, 5);
/// assert!(outcome.selected_features.windows(2).all(|w| w[0] < w[1]));
/// ```
#[derive(Debug)]
pub struct GeneticSearch {
    config: GaConfig,
    num_features: usize,
    selection: Box<dyn SelectionStrategy>,
    crossover: Box<dyn CrossoverOperator>,
    mutation: Box<dyn MutationOperator>,
    hybrid: Option<HybridLocalSearch>,
    initial_population: Vec<FeatureMask>,
    population: Population<Individual>,
    generation: usize,
    cancellation: CancellationToken,
}

impl GeneticSearch {
    /// Validates `config` against `dataset` and prepares the engine.
    ///
    /// The hybrid variant groups the features by correlation here, once per engine.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Configuration` if the configuration doesn't fit the
    /// dataset.
    pub fn configure(config: GaConfig, dataset: &Dataset) -> Result<Self> {
        config.validate(dataset)?;
        let num_features = dataset.num_features();

        let hybrid = match config.variant() {
            GaVariant::Simple => None,
            GaVariant::Hybrid => Some(HybridLocalSearch::from_dataset(
                dataset,
                config.local_search_alpha(),
                config.subset_size_ratio(),
            )?),
        };

        Ok(Self {
            selection: config.selection().build(),
            crossover: config.crossover().build(),
            mutation: Box::new(BitwiseMutation),
            config,
            num_features,
            hybrid,
            initial_population: Vec::new(),
            population: Population::default(),
            generation: 0,
            cancellation: CancellationToken::new(),
        })
    }

    /// Replaces the selection strategy named in the configuration.
    pub fn with_selection(mut self, selection: Box<dyn SelectionStrategy>) -> Self {
        self.selection = selection;
        self
    }

    /// Replaces the crossover operator named in the configuration.
    pub fn with_crossover(mut self, crossover: Box<dyn CrossoverOperator>) -> Self {
        self.crossover = crossover;
        self
    }

    pub fn with_mutation(mut self, mutation: Box<dyn MutationOperator>) -> Self {
        self.mutation = mutation;
        self
    }

    /// Seeds the first generation with `genomes`. Remaining slots are filled
    /// randomly.
    ///
    /// # Errors
    ///
    /// Returns an error if there are more genomes than the population size or a
    /// genome's length differs from the number of features.
    pub fn with_initial_population(mut self, genomes: Vec<FeatureMask>) -> Result<Self> {
        let population_size = self.config.search().population_size();
        if genomes.len() > population_size {
            return Err(SearchError::Configuration(format!(
                "Initial population ({}) exceeds the population size ({})",
                genomes.len(),
                population_size
            )));
        }
        if let Some(genome) = genomes.iter().find(|g| g.len() != self.num_features) {
            return Err(SearchError::Configuration(format!(
                "Initial genome has {} genes, expected {}",
                genome.len(),
                self.num_features
            )));
        }
        self.initial_population = genomes;
        Ok(self)
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Runs the search to completion.
    pub fn run<E: FitnessEvaluator>(&mut self, evaluator: &E) -> Result<SearchOutcome> {
        let token = self.cancellation.clone();
        run_search(self, evaluator, &token)
    }

    pub fn snapshot(&self) -> PopulationSnapshot {
        PopulationSnapshot {
            generation: self.generation,
            individuals: self.population.as_slice().to_vec(),
        }
    }

    fn random_genome(&self, rng: &mut RandomNumberGenerator) -> FeatureMask {
        match &self.hybrid {
            None => FeatureMask::random(self.num_features, 0.5, rng),
            Some(hybrid) => FeatureMask::from_genes(hybrid.random_mask(self.num_features, rng)),
        }
    }
}

impl Metaheuristic for GeneticSearch {
    type Candidate = Individual;

    fn name(&self) -> &'static str {
        match self.config.variant() {
            GaVariant::Simple => "simple-ga",
            GaVariant::Hybrid => "hgafs",
        }
    }

    fn config(&self) -> &SearchConfig {
        self.config.search()
    }

    fn initialize(&mut self, rng: &mut RandomNumberGenerator) -> Result<()> {
        let population_size = self.config.search().population_size();
        let mut individuals: Vec<Individual> = self
            .initial_population
            .iter()
            .cloned()
            .map(Individual::new)
            .collect();

        while individuals.len() < population_size {
            individuals.push(Individual::new(self.random_genome(rng)));
        }

        self.population = Population::new(individuals);
        self.generation = 0;
        Ok(())
    }

    fn evaluate(&mut self, scope: &EvaluationScope<'_>, _rng: &mut RandomNumberGenerator) -> Result<()> {
        scope.evaluate_candidates(self.population.as_mut_slice())?;
        self.generation += 1;
        Ok(())
    }

    fn operate(&mut self, rng: &mut RandomNumberGenerator) -> Result<()> {
        let population_size = self.config.search().population_size();
        let fitness = self.population.fitness();

        let elites: Vec<Individual> = self
            .population
            .ranked_indices()
            .into_iter()
            .take(self.config.elitism())
            .map(|i| self.population[i].clone())
            .collect();

        let num_offspring = population_size - elites.len();
        let pool = self.selection.select(&fitness, num_offspring, rng)?;
        let mut offspring: Vec<Individual> =
            pool.iter().map(|&i| self.population[i].clone()).collect();

        crossover_pairs(
            self.crossover.as_ref(),
            &mut offspring,
            self.config.crossover_rate(),
            rng,
        );

        let mut flipped = 0;
        for child in offspring.iter_mut() {
            flipped += self
                .mutation
                .mutate(child.genome.genes_mut(), self.config.mutation_rate(), rng);
            if let Some(hybrid) = &self.hybrid {
                hybrid.apply(child.genome.genes_mut(), rng);
            }
        }
        trace!(generation = self.generation, flipped, "bred offspring");

        let mut next = elites;
        next.extend(offspring);
        self.population.replace(next);
        Ok(())
    }

    fn candidates(&self) -> &[Individual] {
        self.population.as_slice()
    }
}
