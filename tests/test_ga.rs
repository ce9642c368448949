use featsel::{
    breeding::CrossoverKind,
    candidate::FeatureMask,
    dataset::Dataset,
    error::{Result, SearchError},
    evaluation::{Criteria, EvaluationContext},
    ga::{GaConfig, GaVariant, GeneticSearch},
    search::SearchConfig,
    selection::SelectionKind,
};
use std::sync::atomic::{AtomicUsize, Ordering};

// Twelve samples, ten features, two classes.
fn dataset() -> Dataset {
    let samples = (0..12)
        .map(|i| {
            (0..10)
                .map(|j| ((i * 7 + j * 3) % 13) as f64 + if i % 2 == 0 { j as f64 } else { 0.0 })
                .collect()
        })
        .collect();
    let labels = (0..12).map(|i| i % 2).collect();
    Dataset::new(samples, labels).unwrap()
}

// Features 0, 1 and 2 carry the signal, everything else costs a little accuracy.
fn informative(features: &[usize], _ctx: &EvaluationContext<'_>) -> Result<Criteria> {
    let hits = features.iter().filter(|&&f| f < 3).count();
    let noise = features.len() - hits;
    Ok(Criteria::from_accuracy(
        60.0 + 10.0 * hits as f64 - 2.0 * noise as f64,
    ))
}

fn config(variant: GaVariant, iterations: usize) -> GaConfig {
    GaConfig::builder()
        .search(
            SearchConfig::builder()
                .population_size(8)
                .max_iterations(iterations)
                .k_folds(3)
                .seed(2024)
                .build(),
        )
        .variant(variant)
        .mutation_rate(0.05)
        .build()
}

#[test]
fn test_simple_ga_improves_on_random_start() {
    let mut search = GeneticSearch::configure(config(GaVariant::Simple, 30), &dataset()).unwrap();
    let outcome = search.run(&informative).unwrap();

    assert_eq!(outcome.generations, 30);
    let first = outcome.history.first().unwrap().overall_best_fitness;
    assert!(outcome.best_fitness >= first);
    assert!(outcome
        .history
        .windows(2)
        .all(|w| w[0].overall_best_fitness <= w[1].overall_best_fitness));
    assert!(outcome.selected_features.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_hybrid_ga_runs_every_operator_combination() {
    for selection in [SelectionKind::FitnessProportional, SelectionKind::RankBased] {
        for crossover in [CrossoverKind::OnePoint, CrossoverKind::TwoPoint, CrossoverKind::Uniform] {
            let config = GaConfig::builder()
                .search(
                    SearchConfig::builder()
                        .population_size(6)
                        .max_iterations(5)
                        .k_folds(3)
                        .seed(7)
                        .build(),
                )
                .variant(GaVariant::Hybrid)
                .selection(selection)
                .crossover(crossover)
                .build();

            let mut search = GeneticSearch::configure(config, &dataset()).unwrap();
            let outcome = search.run(&informative).unwrap();
            assert_eq!(outcome.history.len(), 5);
            assert!(!outcome.selected_features.is_empty());
        }
    }
}

#[test]
fn test_same_seed_same_outcome() {
    let first = GeneticSearch::configure(config(GaVariant::Hybrid, 10), &dataset())
        .unwrap()
        .run(&informative)
        .unwrap();
    let second = GeneticSearch::configure(config(GaVariant::Hybrid, 10), &dataset())
        .unwrap()
        .run(&informative)
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_empty_subsets_never_reach_the_evaluator() {
    let calls = AtomicUsize::new(0);
    let strict = |features: &[usize], ctx: &EvaluationContext<'_>| -> Result<Criteria> {
        if features.is_empty() {
            return Err(SearchError::Evaluation("empty subset".to_string()));
        }
        calls.fetch_add(1, Ordering::SeqCst);
        informative(features, ctx)
    };

    let config = GaConfig::builder()
        .search(
            SearchConfig::builder()
                .population_size(4)
                .max_iterations(6)
                .k_folds(3)
                .seed(5)
                .build(),
        )
        .mutation_rate(0.1)
        .build();
    let empty = vec![FeatureMask::new(10); 4];
    let mut search = GeneticSearch::configure(config, &dataset())
        .unwrap()
        .with_initial_population(empty)
        .unwrap();

    let outcome = search.run(&strict).unwrap();

    // The first generation is all empty, so nothing was evaluated.
    assert_eq!(outcome.history[0].best_fitness, 0.0);
    assert_eq!(outcome.history[0].evaluations, 0);
    assert_eq!(outcome.evaluations, calls.load(Ordering::SeqCst));
}

#[test]
fn test_evaluator_failure_is_propagated() {
    let failing = |_features: &[usize], _ctx: &EvaluationContext<'_>| -> Result<Criteria> {
        Err(SearchError::Evaluation("classifier exited with status 1".to_string()))
    };

    let mut search = GeneticSearch::configure(config(GaVariant::Simple, 3), &dataset()).unwrap();
    assert!(matches!(search.run(&failing), Err(SearchError::Evaluation(_))));
}

#[test]
fn test_configuration_errors_surface_before_running() {
    let too_many = GaConfig::builder()
        .search(SearchConfig::builder().population_size(11).k_folds(3).build())
        .build();
    assert!(matches!(
        GeneticSearch::configure(too_many, &dataset()),
        Err(SearchError::Configuration(_))
    ));

    let bad_rate = GaConfig::builder()
        .search(SearchConfig::builder().population_size(4).k_folds(3).build())
        .crossover_rate(1.5)
        .build();
    assert!(GeneticSearch::configure(bad_rate, &dataset()).is_err());

    let bad_folds = GaConfig::builder()
        .search(SearchConfig::builder().population_size(4).k_folds(13).build())
        .build();
    assert!(GeneticSearch::configure(bad_folds, &dataset()).is_err());
}
