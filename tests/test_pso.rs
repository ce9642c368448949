use featsel::{
    dataset::Dataset,
    error::{Result, SearchError},
    evaluation::{Criteria, EvaluationContext},
    pso::{ParticleSwarmSearch, PsoConfig, PsoVariant},
    search::SearchConfig,
};

fn dataset() -> Dataset {
    let samples = (0..10)
        .map(|i| (0..12).map(|j| ((i + 1) * (j + 2) % 17) as f64).collect())
        .collect();
    let labels = (0..10).map(|i| usize::from(i >= 5)).collect();
    Dataset::new(samples, labels).unwrap()
}

// Best with features 0..4 and nothing else.
fn target_subset(features: &[usize], _ctx: &EvaluationContext<'_>) -> Result<Criteria> {
    let hits = features.iter().filter(|&&f| f < 4).count() as f64;
    let misses = features.len() as f64 - hits;
    Ok(Criteria::from_accuracy(50.0 + 12.0 * hits - 3.0 * misses))
}

fn config(variant: PsoVariant) -> PsoConfig {
    PsoConfig::builder()
        .search(
            SearchConfig::builder()
                .population_size(6)
                .max_iterations(12)
                .k_folds(2)
                .seed(99)
                .build(),
        )
        .variant(variant)
        .build()
}

const VARIANTS: [PsoVariant; 4] = [
    PsoVariant::Binary,
    PsoVariant::Continuous,
    PsoVariant::FourTwo,
    PsoVariant::HybridLocalSearch,
];

#[test]
fn test_global_best_matches_outcome() {
    for variant in VARIANTS {
        let mut swarm = ParticleSwarmSearch::configure(config(variant), &dataset()).unwrap();
        let outcome = swarm.run(&target_subset).unwrap();

        let global_best = swarm.global_best().unwrap();
        assert_eq!(global_best.fitness, outcome.best_fitness, "{variant:?}");
        // Only 4-2 breaks fitness ties the same way the outcome does.
        if variant == PsoVariant::FourTwo {
            assert_eq!(global_best.mask.selected(), outcome.selected_features);
        }
    }
}

#[test]
fn test_overall_best_never_decreases() {
    for variant in VARIANTS {
        let mut swarm = ParticleSwarmSearch::configure(config(variant), &dataset()).unwrap();
        let outcome = swarm.run(&target_subset).unwrap();

        assert_eq!(outcome.generations, 12);
        assert!(outcome
            .history
            .windows(2)
            .all(|w| w[0].overall_best_fitness <= w[1].overall_best_fitness));
    }
}

#[test]
fn test_positions_respect_bounds() {
    let mut swarm = ParticleSwarmSearch::configure(config(PsoVariant::Continuous), &dataset()).unwrap();
    swarm.run(&target_subset).unwrap();

    let snapshot = swarm.snapshot();
    assert_eq!(snapshot.generation, 12);
    for particle in &snapshot.particles {
        assert!(particle.position.iter().all(|&x| (0.0..=1.0).contains(&x)));
        assert!(particle.velocity.iter().all(|&v| (-0.6..=0.6).contains(&v)));
        for (feature, &x) in particle.position.iter().enumerate() {
            assert_eq!(particle.mask.get(feature), x > 0.6);
        }
    }
}

#[test]
fn test_same_seed_same_outcome() {
    let run = || {
        ParticleSwarmSearch::configure(config(PsoVariant::HybridLocalSearch), &dataset())
            .unwrap()
            .run(&target_subset)
            .unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_threshold_outside_position_bounds_is_rejected() {
    let config = PsoConfig::builder()
        .search(SearchConfig::builder().population_size(4).k_folds(2).build())
        .variant(PsoVariant::Continuous)
        .threshold(1.5)
        .build();

    assert!(matches!(
        ParticleSwarmSearch::configure(config, &dataset()),
        Err(SearchError::Configuration(_))
    ));
}

#[test]
fn test_threshold_on_a_position_bound_is_rejected() {
    for (variant, threshold) in [
        (PsoVariant::FourTwo, 1.0),
        (PsoVariant::FourTwo, 0.0),
        (PsoVariant::Continuous, 1.0),
        (PsoVariant::Continuous, 0.0),
    ] {
        let config = PsoConfig::builder()
            .search(SearchConfig::builder().population_size(4).k_folds(2).build())
            .variant(variant)
            .position_bounds(0.0, 1.0)
            .threshold(threshold)
            .build();

        assert!(
            matches!(
                ParticleSwarmSearch::configure(config, &dataset()),
                Err(SearchError::Configuration(_))
            ),
            "{variant:?} with threshold {threshold}"
        );
    }
}

#[test]
fn test_binary_variant_ignores_threshold() {
    let config = PsoConfig::builder()
        .search(SearchConfig::builder().population_size(4).k_folds(2).build())
        .variant(PsoVariant::Binary)
        .threshold(1.0)
        .build();

    assert!(ParticleSwarmSearch::configure(config, &dataset()).is_ok());
}
