use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use featsel::{
    aco::transition::{choose_next, relevance_redundancy_score},
    breeding::{
        crossover_pairs, BitwiseMutation, CrossoverOperator, MutationOperator, OnePointCrossover,
        TwoPointCrossover, UniformCrossover,
    },
    candidate::FeatureMask,
    dataset::Dataset,
    local_search::HybridLocalSearch,
    relevance::{absolute_cosine, RelevanceScorer, TermVariance},
    rng::RandomNumberGenerator,
    selection::{FitnessProportionalSelection, RankBasedSelection, SelectionStrategy},
};

fn synthetic_dataset(samples: usize, features: usize) -> Dataset {
    let rows = (0..samples)
        .map(|i| {
            (0..features)
                .map(|j| ((i * 31 + j * 17) % 97) as f64 / 7.0)
                .collect()
        })
        .collect();
    let labels = (0..samples).map(|i| i % 3).collect();
    Dataset::new(rows, labels).unwrap()
}

fn bench_crossover(c: &mut Criterion) {
    let mut group = c.benchmark_group("crossover");
    let mut rng = RandomNumberGenerator::from_seed(1);
    let operators: [(&str, &dyn CrossoverOperator); 3] = [
        ("one_point", &OnePointCrossover),
        ("two_point", &TwoPointCrossover),
        ("uniform", &UniformCrossover),
    ];

    for features in [100, 1000, 10000].iter() {
        let pool: Vec<FeatureMask> = (0..50)
            .map(|_| FeatureMask::random(*features, 0.5, &mut rng))
            .collect();

        for (name, operator) in operators {
            group.bench_with_input(BenchmarkId::new(name, features), &pool, |b, pool| {
                b.iter(|| {
                    let mut pool = pool.clone();
                    crossover_pairs(operator, black_box(&mut pool), 0.8, &mut rng);
                    pool
                })
            });
        }
    }
    group.finish();
}

fn bench_mutation(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutation");
    let mut rng = RandomNumberGenerator::from_seed(2);

    for features in [100, 1000, 10000].iter() {
        let mut mask = FeatureMask::random(*features, 0.5, &mut rng);
        group.bench_function(BenchmarkId::new("bitwise", features), |b| {
            b.iter(|| BitwiseMutation.mutate(black_box(mask.genes_mut()), 0.01, &mut rng))
        });
    }
    group.finish();
}

fn bench_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection");
    let mut rng = RandomNumberGenerator::from_seed(3);

    for size in [10, 100, 1000].iter() {
        let fitness: Vec<f64> = (0..*size).map(|i| (i % 100) as f64).collect();

        group.bench_with_input(BenchmarkId::new("fitness_proportional", size), &fitness, |b, fitness| {
            b.iter(|| FitnessProportionalSelection.select(black_box(fitness), fitness.len(), &mut rng))
        });
        group.bench_with_input(BenchmarkId::new("rank_based", size), &fitness, |b, fitness| {
            b.iter(|| RankBasedSelection.select(black_box(fitness), fitness.len(), &mut rng))
        });
    }
    group.finish();
}

fn bench_local_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("hybrid_local_search");
    let mut rng = RandomNumberGenerator::from_seed(4);

    for features in [20, 100, 400].iter() {
        let dataset = synthetic_dataset(60, *features);
        let local_search = HybridLocalSearch::from_dataset(&dataset, 0.65, 0.3).unwrap();
        let mask = FeatureMask::random(*features, 0.5, &mut rng);

        group.bench_with_input(BenchmarkId::from_parameter(features), &mask, |b, mask| {
            b.iter(|| {
                let mut mask = mask.clone();
                local_search.apply(black_box(mask.genes_mut()), &mut rng)
            })
        });
    }
    group.finish();
}

fn bench_ant_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("ant_transition");
    let mut rng = RandomNumberGenerator::from_seed(5);

    for features in [20, 100, 400].iter() {
        let dataset = synthetic_dataset(60, *features);
        let similarity = absolute_cosine(&dataset);
        let relevance = TermVariance.relevance(&dataset);

        group.bench_function(BenchmarkId::from_parameter(features), |b| {
            b.iter(|| {
                let candidates: Vec<(usize, f64)> = (1..*features)
                    .map(|j| (j, relevance_redundancy_score(1.0, relevance[j], similarity.get(0, j), 1.0, 1.0)))
                    .collect();
                choose_next(black_box(&candidates), 0.7, &mut rng)
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_crossover,
    bench_mutation,
    bench_selection,
    bench_local_search,
    bench_ant_step
);
criterion_main!(benches);
