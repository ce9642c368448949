use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::{debug, info};

use super::{CancellationToken, GenerationStats, SearchConfig, SearchOutcome};
use crate::candidate::{is_better, Candidate};
use crate::error::{OptionExt, Result, SearchError};
use crate::evaluation::{evaluate_subset, EvaluationContext, FitnessEvaluator, TempWorkspace};
use crate::rng::RandomNumberGenerator;

/// One engine family plugged into the shared generation loop.
///
/// [`run_search`] drives an implementation through
/// `Init -> Evaluate -> (Operate -> Evaluate)* -> Terminate`: `evaluate` runs
/// exactly `max_iterations` times and `operate` once between consecutive
/// generations, so the final candidates always carry their own fitness.
pub trait Metaheuristic {
    type Candidate: Candidate;

    /// Short name used in log events.
    fn name(&self) -> &'static str;

    fn config(&self) -> &SearchConfig;

    /// Number of scratch directories the run needs. One per candidate by default.
    fn workspace_slots(&self) -> usize {
        self.config().population_size()
    }

    /// Builds the initial candidates. Called once per run, before the first
    /// generation, and must discard any state left by a previous run.
    fn initialize(&mut self, rng: &mut RandomNumberGenerator) -> Result<()>;

    /// Brings every candidate's fitness up to date.
    fn evaluate(&mut self, scope: &EvaluationScope<'_>, rng: &mut RandomNumberGenerator) -> Result<()>;

    /// Applies the family's operators and replacement for the next generation. Not
    /// called after the last generation.
    fn operate(&mut self, rng: &mut RandomNumberGenerator) -> Result<()>;

    /// Candidates of the current generation.
    fn candidates(&self) -> &[Self::Candidate];
}

/// Evaluation services for one run: the evaluator, the per-slot scratch
/// directories and a count of evaluator calls.
pub struct EvaluationScope<'a> {
    evaluator: &'a dyn FitnessEvaluator,
    workspace: &'a TempWorkspace,
    k_folds: usize,
    parallel_threshold: usize,
    calls: AtomicUsize,
}

impl<'a> EvaluationScope<'a> {
    pub fn new(
        evaluator: &'a dyn FitnessEvaluator,
        workspace: &'a TempWorkspace,
        k_folds: usize,
        parallel_threshold: usize,
    ) -> Self {
        Self {
            evaluator,
            workspace,
            k_folds,
            parallel_threshold,
            calls: AtomicUsize::new(0),
        }
    }

    /// Scores one subset in the scratch directory of `slot`.
    pub fn evaluate(&self, slot: usize, features: &[usize]) -> Result<f64> {
        if !features.is_empty() {
            self.calls.fetch_add(1, Ordering::Relaxed);
        }
        let ctx = EvaluationContext::new(self.workspace.slot_dir(slot), self.k_folds);
        evaluate_subset(self.evaluator, features, &ctx)
    }

    /// Scores `subsets[i]` in slot `i`. Batches at least as large as the parallel
    /// threshold are evaluated on the rayon pool.
    pub fn evaluate_batch(&self, subsets: &[Vec<usize>]) -> Result<Vec<f64>> {
        if subsets.len() >= self.parallel_threshold {
            subsets
                .par_iter()
                .enumerate()
                .map(|(slot, features)| self.evaluate(slot, features))
                .collect()
        } else {
            subsets
                .iter()
                .enumerate()
                .map(|(slot, features)| self.evaluate(slot, features))
                .collect()
        }
    }

    /// Evaluates every candidate and stores its fitness.
    pub fn evaluate_candidates<C: Candidate>(&self, candidates: &mut [C]) -> Result<()> {
        let subsets: Vec<Vec<usize>> = candidates.iter().map(Candidate::selected_features).collect();
        let fitness = self.evaluate_batch(&subsets)?;
        for (candidate, fitness) in candidates.iter_mut().zip(fitness) {
            candidate.set_fitness(fitness);
        }
        Ok(())
    }

    /// Evaluator calls made so far.
    pub fn evaluations(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

struct BestSoFar {
    features: Vec<usize>,
    fitness: f64,
}

/// Runs `engine` to completion.
///
/// Creates the temporary workspace, seeds the RNG from the configuration, then
/// performs exactly `max_iterations` generations. The best candidate over all
/// evaluated generations is returned; equal fitness prefers the smaller subset.
///
/// # Errors
///
/// Returns `SearchError::Cancelled` if `cancellation` is set at a generation
/// boundary, and propagates workspace, evaluator and operator failures. The
/// workspace is removed on every exit path.
pub fn run_search<M, E>(
    engine: &mut M,
    evaluator: &E,
    cancellation: &CancellationToken,
) -> Result<SearchOutcome>
where
    M: Metaheuristic + ?Sized,
    E: FitnessEvaluator,
{
    let config = engine.config().clone();
    let workspace = TempWorkspace::create(engine.workspace_slots())?;
    let scope = EvaluationScope::new(
        evaluator,
        &workspace,
        config.k_folds(),
        config.parallel_threshold(),
    );
    let mut rng = RandomNumberGenerator::from_optional_seed(config.seed());

    info!(
        engine = engine.name(),
        population = config.population_size(),
        iterations = config.max_iterations(),
        k_folds = config.k_folds(),
        "starting search"
    );

    engine.initialize(&mut rng)?;

    let mut best: Option<BestSoFar> = None;
    let mut history = Vec::with_capacity(config.max_iterations());

    for generation in 0..config.max_iterations() {
        if cancellation.is_cancelled() {
            info!(engine = engine.name(), generation, "search cancelled");
            return Err(SearchError::Cancelled { generation });
        }

        engine.evaluate(&scope, &mut rng)?;

        let candidates = engine.candidates();
        let mut leader: Option<&M::Candidate> = None;
        for candidate in candidates {
            let replaces = leader.map_or(true, |l| {
                is_better(
                    candidate.fitness(),
                    candidate.num_selected(),
                    l.fitness(),
                    l.num_selected(),
                )
            });
            if replaces {
                leader = Some(candidate);
            }
        }
        let leader = leader.ok_or_else_search(|| SearchError::EmptyPopulation)?;

        let improved = best.as_ref().map_or(true, |b| {
            is_better(
                leader.fitness(),
                leader.num_selected(),
                b.fitness,
                b.features.len(),
            )
        });
        if improved {
            best = Some(BestSoFar {
                features: leader.selected_features(),
                fitness: leader.fitness(),
            });
        }

        let mean_fitness =
            candidates.iter().map(Candidate::fitness).sum::<f64>() / candidates.len() as f64;
        let overall_best_fitness = best.as_ref().map_or(leader.fitness(), |b| b.fitness);
        let stats = GenerationStats {
            generation,
            best_fitness: leader.fitness(),
            mean_fitness,
            best_subset_size: leader.num_selected(),
            overall_best_fitness,
            evaluations: scope.evaluations(),
        };

        debug!(
            engine = engine.name(),
            generation,
            best_fitness = stats.best_fitness,
            mean_fitness = stats.mean_fitness,
            subset_size = stats.best_subset_size,
            overall_best = stats.overall_best_fitness,
            "generation complete"
        );
        history.push(stats);

        if generation + 1 < config.max_iterations() {
            engine.operate(&mut rng)?;
        }
    }

    let evaluations = scope.evaluations();
    drop(scope);
    workspace.close()?;

    let best = best.ok_or_else_search(|| {
        SearchError::Other("Search finished without evaluating any candidate".to_string())
    })?;

    info!(
        engine = engine.name(),
        best_fitness = best.fitness,
        subset_size = best.features.len(),
        evaluations,
        "search finished"
    );

    Ok(SearchOutcome {
        selected_features: best.features,
        best_fitness: best.fitness,
        generations: history.len(),
        evaluations,
        history,
    })
}
