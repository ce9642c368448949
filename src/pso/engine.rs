use tracing::trace;

use super::update::{binary_position, continuous_position, positions_for_mask, update_velocity};
use super::{PsoConfig, PsoVariant};
use crate::candidate::{FeatureMask, GlobalBest, Particle};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::evaluation::FitnessEvaluator;
use crate::local_search::HybridLocalSearch;
use crate::rng::RandomNumberGenerator;
use crate::search::{
    run_search, CancellationToken, EvaluationScope, Metaheuristic, Population, SearchConfig,
    SearchOutcome,
};

/// State of a PSO run between generations.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SwarmSnapshot {
    /// Generations completed so far.
    pub generation: usize,
    pub particles: Vec<Particle>,
    /// `None` until the first evaluation.
    pub global_best: Option<GlobalBest>,
}

/// A particle swarm optimizer over feature masks.
///
/// Each generation evaluates every particle, updates the personal and global
/// bests, then moves the swarm with the velocity rule and the variant's position
/// rule. HPSO-LS finishes each move with correlation-based local search.
#[derive(Debug)]
pub struct ParticleSwarmSearch {
    config: PsoConfig,
    num_features: usize,
    hybrid: Option<HybridLocalSearch>,
    swarm: Population<Particle>,
    global_best: GlobalBest,
    generation: usize,
    cancellation: CancellationToken,
}

impl ParticleSwarmSearch {
    /// Validates `config` against `dataset` and prepares the engine.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Configuration` if the configuration doesn't fit the
    /// dataset.
    pub fn configure(config: PsoConfig, dataset: &Dataset) -> Result<Self> {
        config.validate(dataset)?;
        let num_features = dataset.num_features();

        let hybrid = match config.variant() {
            PsoVariant::HybridLocalSearch => Some(HybridLocalSearch::from_dataset(
                dataset,
                config.local_search_alpha(),
                config.subset_size_ratio(),
            )?),
            _ => None,
        };

        Ok(Self {
            config,
            num_features,
            hybrid,
            swarm: Population::default(),
            global_best: GlobalBest::unset(num_features),
            generation: 0,
            cancellation: CancellationToken::new(),
        })
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn config(&self) -> &PsoConfig {
        &self.config
    }

    /// Runs the search to completion.
    pub fn run<E: FitnessEvaluator>(&mut self, evaluator: &E) -> Result<SearchOutcome> {
        let token = self.cancellation.clone();
        run_search(self, evaluator, &token)
    }

    pub fn global_best(&self) -> Option<&GlobalBest> {
        self.global_best.is_set().then_some(&self.global_best)
    }

    pub fn snapshot(&self) -> SwarmSnapshot {
        SwarmSnapshot {
            generation: self.generation,
            particles: self.swarm.as_slice().to_vec(),
            global_best: self.global_best().cloned(),
        }
    }

    fn prefers_smaller(&self) -> bool {
        self.config.variant() == PsoVariant::FourTwo
    }

    fn random_velocity(&self, rng: &mut RandomNumberGenerator) -> Vec<f64> {
        (0..self.num_features)
            .map(|_| rng.uniform_range(self.config.min_velocity(), self.config.max_velocity()))
            .collect()
    }

    /// Initial mask sizes for PSO(4-2): two thirds of the swarm start near 10% of
    /// the features, the rest between half and all of them.
    fn four_two_size(&self, index: usize, rng: &mut RandomNumberGenerator) -> usize {
        let n = self.num_features;
        let swarm_size = self.config.search().population_size();
        let small_count = (2.0 * swarm_size as f64 / 3.0).round() as usize;

        if index < small_count {
            ((n as f64 * 0.1).round() as usize).max(1)
        } else {
            rng.gen_inclusive((n / 2).max(1), n)
        }
    }

    fn spawn(&self, index: usize, rng: &mut RandomNumberGenerator) -> Particle {
        let n = self.num_features;
        let mut particle = match self.config.variant() {
            PsoVariant::Binary => Particle::from_mask(FeatureMask::random(n, 0.5, rng)),
            PsoVariant::HybridLocalSearch => {
                let genes = match &self.hybrid {
                    Some(hybrid) => hybrid.random_mask(n, rng),
                    None => FeatureMask::random(n, 0.5, rng).genes().to_vec(),
                };
                Particle::from_mask(FeatureMask::from_genes(genes))
            }
            PsoVariant::Continuous => {
                let position: Vec<f64> = (0..n)
                    .map(|_| rng.uniform_range(self.config.min_position(), self.config.max_position()))
                    .collect();
                let mask = FeatureMask::from_genes(
                    position.iter().map(|&x| x > self.config.threshold()).collect(),
                );
                Particle::new(position, mask)
            }
            PsoVariant::FourTwo => {
                let size = self.four_two_size(index, rng);
                let mask = FeatureMask::random_with_size(n, size, rng);
                let position = positions_for_mask(&mask, &self.config, rng);
                Particle::new(position, mask)
            }
        };
        particle.velocity = self.random_velocity(rng);
        particle
    }
}

impl Metaheuristic for ParticleSwarmSearch {
    type Candidate = Particle;

    fn name(&self) -> &'static str {
        match self.config.variant() {
            PsoVariant::Binary => "binary-pso",
            PsoVariant::Continuous => "continuous-pso",
            PsoVariant::FourTwo => "pso-4-2",
            PsoVariant::HybridLocalSearch => "hpso-ls",
        }
    }

    fn config(&self) -> &SearchConfig {
        self.config.search()
    }

    fn initialize(&mut self, rng: &mut RandomNumberGenerator) -> Result<()> {
        let swarm_size = self.config.search().population_size();
        let particles = (0..swarm_size).map(|i| self.spawn(i, rng)).collect();

        self.swarm = Population::new(particles);
        self.global_best = GlobalBest::unset(self.num_features);
        self.generation = 0;
        Ok(())
    }

    fn evaluate(&mut self, scope: &EvaluationScope<'_>, _rng: &mut RandomNumberGenerator) -> Result<()> {
        scope.evaluate_candidates(self.swarm.as_mut_slice())?;
        self.generation += 1;

        let prefer_smaller = self.prefers_smaller();
        for particle in self.swarm.iter_mut() {
            particle.offer_personal_best(prefer_smaller);
            let best = &particle.best;
            if self
                .global_best
                .offer(&best.position, &best.mask, best.fitness, prefer_smaller)
            {
                trace!(fitness = best.fitness, size = best.mask.count(), "new global best");
            }
        }
        Ok(())
    }

    fn operate(&mut self, rng: &mut RandomNumberGenerator) -> Result<()> {
        let variant = self.config.variant();

        for particle in self.swarm.iter_mut() {
            update_velocity(particle, &self.global_best, &self.config, rng);

            if variant.is_continuous() {
                continuous_position(particle, &self.config);
            } else {
                binary_position(particle, rng);
            }

            if let Some(hybrid) = &self.hybrid {
                hybrid.apply(particle.mask.genes_mut(), rng);
                for (x, &selected) in particle.position.iter_mut().zip(particle.mask.genes()) {
                    *x = if selected { 1.0 } else { 0.0 };
                }
            }
        }
        Ok(())
    }

    fn candidates(&self) -> &[Particle] {
        self.swarm.as_slice()
    }
}
