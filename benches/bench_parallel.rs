use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use genpool::{
    breeding::{BreedPlan, WorkerPool},
    evolution::{evaluator::evaluate, EvolutionLauncher, EvolutionOptions},
    gene_space::GeneSpace,
    operators::mutate,
    population::{Individual, Population},
    rng::RandomNumberGenerator,
};

// Alternating targets, as in the classic 50-gene demo problem.
fn alternating_target(genome: &[i64]) -> i64 {
    genome
        .iter()
        .enumerate()
        .map(|(idx, gene)| {
            let target = if idx % 2 == 0 { 5 } else { -5 };
            10 - (target - gene / 1000).abs()
        })
        .sum()
}

fn elite(space: &GeneSpace, size: usize) -> Vec<Individual> {
    let mut rng = RandomNumberGenerator::from_seed(7);
    let individuals = (0..size * 2)
        .map(|_| evaluate(&alternating_target, mutate(space, &mut rng)))
        .collect::<genpool::Result<Vec<_>>>()
        .unwrap();
    Population::from_unsorted(individuals).top(size).to_vec()
}

fn bench_worker_pool(c: &mut Criterion) {
    let space = GeneSpace::uniform(50, 0, 10_000).unwrap();
    let elite = elite(&space, 50);

    let mut group = c.benchmark_group("worker_pool");
    group.sample_size(10);
    for threads in [1, 2, 4, 8, 12].iter() {
        let pool = WorkerPool::new(*threads).unwrap();
        let plan = BreedPlan {
            quota: 10_000usize.div_ceil(*threads),
            batch_cap: 250,
            refill_bound: 20,
            mutation_prob: 3,
            offset_multiplier: 5,
        };

        group.bench_with_input(BenchmarkId::from_parameter(threads), &plan, |b, plan| {
            b.iter(|| {
                pool.breed(
                    black_box(&space),
                    black_box(&elite),
                    &alternating_target,
                    black_box(plan),
                    42,
                )
                .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_evolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("evolution");
    group.sample_size(10);

    for size in [1_000, 5_000].iter() {
        let options = EvolutionOptions::builder()
            .max_population(*size)
            .threads(4)
            .seed(3)
            .build();
        let launcher = EvolutionLauncher::new(
            GeneSpace::uniform(50, 0, 10_000).unwrap(),
            alternating_target,
        )
        .with_options(options);

        group.bench_with_input(BenchmarkId::from_parameter(size), &launcher, |b, launcher| {
            b.iter(|| {
                let outcome = launcher.run(black_box(f64::INFINITY), 20);
                assert!(outcome.is_ok());
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_worker_pool, bench_evolution);
criterion_main!(benches);
