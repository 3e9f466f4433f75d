//! Criterion benchmarks for greedy allocation and annealing.
//!
//! Instances are generated from a fixed seed: demands in [40, 100],
//! capacities around total demand / facilities, fixed costs in
//! [500, 2000], transport costs in [5, 30].

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use u_facility::facility::solve_annealing;
use u_facility::greedy::GreedyAllocator;
use u_facility::model::Instance;
use u_facility::sa::SaConfig;

fn generate_instance(n: usize, m: usize, seed: u64) -> Instance {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let demands: Vec<f64> = (0..m).map(|_| rng.random_range(40..=100) as f64).collect();
    let total: f64 = demands.iter().sum();
    let base = total / n as f64;
    let mut capacities: Vec<f64> = (0..n)
        .map(|_| (base + rng.random_range(-10..=30) as f64).floor().max(0.0))
        .collect();
    let short = total - capacities.iter().sum::<f64>();
    if short > 0.0 {
        capacities[n - 1] += short.ceil() + 10.0;
    }
    let fixed: Vec<f64> = (0..n).map(|_| rng.random_range(500..=2000) as f64).collect();
    let transport: Vec<Vec<f64>> = (0..n)
        .map(|_| (0..m).map(|_| rng.random_range(5..=30) as f64).collect())
        .collect();
    Instance::from_dense(&fixed, &capacities, &demands, &transport)
        .expect("generated instance is valid")
}

fn bench_greedy(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_all_open");
    group.sample_size(20);

    for (n, m) in [(10usize, 30usize), (100, 800), (300, 500)] {
        let instance = generate_instance(n, m, 42);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("f{n}_c{m}")),
            &instance,
            |b, inst| {
                b.iter(|| {
                    let sol = GreedyAllocator::default().allocate(black_box(inst), None);
                    black_box(sol)
                })
            },
        );
    }
    group.finish();
}

fn bench_annealing(c: &mut Criterion) {
    let mut group = c.benchmark_group("annealing");
    group.sample_size(10);

    for (n, m) in [(10usize, 30usize), (50, 200)] {
        let instance = generate_instance(n, m, 123);
        let config = SaConfig::default().with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("f{n}_c{m}")),
            &(instance, config),
            |b, (inst, cfg)| {
                b.iter(|| {
                    let result = solve_annealing(black_box(inst), black_box(cfg));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_greedy, bench_annealing);
criterion_main!(benches);
