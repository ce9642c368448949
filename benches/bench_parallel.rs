use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use featsel::{
    dataset::Dataset,
    error::Result,
    evaluation::{Criteria, EvaluationContext, TempWorkspace},
    ga::{GaConfig, GeneticSearch},
    search::{EvaluationScope, SearchConfig},
};

// Stands in for training a classifier: a fixed amount of arithmetic per subset.
fn busy_evaluator(features: &[usize], _ctx: &EvaluationContext<'_>) -> Result<Criteria> {
    let mut acc = 0.0f64;
    for round in 0..2000 {
        for &f in features {
            acc = (acc + (f * round) as f64).sqrt();
        }
    }
    Ok(Criteria::from_accuracy(acc % 100.0))
}

fn subsets(count: usize, features: usize) -> Vec<Vec<usize>> {
    (0..count)
        .map(|i| (0..features).filter(|j| (i + j) % 3 != 0).collect())
        .collect()
}

fn bench_batch_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_evaluation");

    // Test with different population sizes
    for size in [10, 100, 1000].iter() {
        let workspace = TempWorkspace::create(*size).unwrap();
        let batch = subsets(*size, 30);

        group.bench_with_input(BenchmarkId::new("sequential", size), &batch, |b, batch| {
            let scope = EvaluationScope::new(&busy_evaluator, &workspace, 5, usize::MAX);
            b.iter(|| scope.evaluate_batch(black_box(batch)))
        });

        group.bench_with_input(BenchmarkId::new("parallel", size), &batch, |b, batch| {
            let scope = EvaluationScope::new(&busy_evaluator, &workspace, 5, 1);
            b.iter(|| scope.evaluate_batch(black_box(batch)))
        });
    }

    group.finish();
}

fn bench_ga_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_run");
    group.sample_size(10);

    let samples = (0..40)
        .map(|i| (0..60).map(|j| ((i * 13 + j * 7) % 23) as f64).collect())
        .collect();
    let dataset = Dataset::new(samples, (0..40).map(|i| i % 2).collect()).unwrap();

    for threshold in [usize::MAX, 1].iter() {
        let label = if *threshold == 1 { "parallel" } else { "sequential" };
        group.bench_function(label, |b| {
            b.iter(|| {
                let config = GaConfig::builder()
                    .search(
                        SearchConfig::builder()
                            .population_size(40)
                            .max_iterations(5)
                            .k_folds(5)
                            .seed(1)
                            .parallel_threshold(*threshold)
                            .build(),
                    )
                    .build();
                GeneticSearch::configure(config, &dataset)
                    .unwrap()
                    .run(&busy_evaluator)
                    .unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_batch_evaluation, bench_ga_run);
criterion_main!(benches);
