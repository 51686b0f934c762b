//! Industry-level POD estimation benchmarks using Criterion.
//!
//! Benchmarks cover:
//! - Scalability (100 to 10K observations)
//! - Box-Cox modes (off, fixed, profile search)
//! - Residual models (normal, Weibull, kernel smoothing)
//! - Bootstrap resampling (100 to 1000 replicates)
//! - Censored inspection data and fitted-curve queries
//!
//! Bootstrap benchmarks use the parallel resampler by default. Use
//! `cargo bench --no-default-features` to measure the serial path.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use podcurve::prelude::*;
use rand::prelude::*;
use rand_distr::{Normal as Gaussian, Uniform};
use std::hint::black_box;

// ============================================================================
// Data Generation with Reproducible RNG
// ============================================================================

/// Generate linear crack-response data with Gaussian noise.
fn generate_crack_response(size: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let size_dist = Uniform::new(0.5, 10.0).unwrap();
    let noise_dist = Gaussian::new(0.0, 0.8).unwrap();

    let a: Vec<f64> = (0..size).map(|_| size_dist.sample(&mut rng)).collect();
    let y: Vec<f64> = a
        .iter()
        .map(|&ai| 1.5 + 2.0 * ai + noise_dist.sample(&mut rng))
        .collect();
    (a, y)
}

/// Generate strictly positive power-law response data, the shape the
/// Box-Cox profile search is built for.
fn generate_power_law_response(size: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let size_dist = Uniform::new(0.5, 10.0).unwrap();
    let noise_dist = Gaussian::<f64>::new(0.0, 0.1).unwrap();

    let a: Vec<f64> = (0..size).map(|_| size_dist.sample(&mut rng)).collect();
    let y: Vec<f64> = a
        .iter()
        .map(|&ai| {
            let base = 0.8 + 0.6 * ai;
            base * base * noise_dist.sample(&mut rng).exp()
        })
        .collect();
    (a, y)
}

/// Generate inspection data clipped by a noise floor and amplifier
/// saturation, so both censoring tails are populated.
fn generate_censored_response(size: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let size_dist = Uniform::new(0.5, 10.0).unwrap();
    let noise_dist = Gaussian::new(0.0, 0.4).unwrap();

    let a: Vec<f64> = (0..size).map(|_| size_dist.sample(&mut rng)).collect();
    let y: Vec<f64> = a
        .iter()
        .map(|&ai| 0.9 * ai + noise_dist.sample(&mut rng))
        .collect();
    (a, y)
}

// ============================================================================
// Benchmark Functions
// ============================================================================

fn bench_scalability(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalability");
    group.sample_size(50);

    for size in [100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));

        let (a, y) = generate_crack_response(size, 42);

        group.bench_with_input(BenchmarkId::new("analysis", size), &size, |b, _| {
            b.iter(|| {
                Pod::new()
                    .box_cox(Off)
                    .adapter(Analysis)
                    .build()
                    .unwrap()
                    .fit(black_box(&a), black_box(&y))
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_box_cox(c: &mut Criterion) {
    let mut group = c.benchmark_group("box_cox");
    group.sample_size(50);

    let size = 1_000;
    let (a, y) = generate_power_law_response(size, 42);

    for (name, mode) in [("off", Off), ("fixed", Fixed(0.5)), ("auto", Auto)] {
        group.bench_with_input(BenchmarkId::new("analysis", name), &mode, |b, &mode| {
            b.iter(|| {
                Pod::new()
                    .box_cox(mode)
                    .adapter(Analysis)
                    .build()
                    .unwrap()
                    .fit(black_box(&a), black_box(&y))
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_residual_models(c: &mut Criterion) {
    let mut group = c.benchmark_group("residual_models");
    group.sample_size(50);

    let size = 1_000;
    let (a, y) = generate_crack_response(size, 42);

    for (name, model) in [
        ("normal", Normal),
        ("weibull", Weibull),
        ("kernel", KernelSmoothing),
    ] {
        group.bench_with_input(BenchmarkId::new("analysis", name), &model, |b, model| {
            b.iter(|| {
                Pod::new()
                    .box_cox(Off)
                    .residual_model(model.clone())
                    .adapter(Analysis)
                    .build()
                    .unwrap()
                    .fit(black_box(&a), black_box(&y))
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_bootstrap(c: &mut Criterion) {
    let mut group = c.benchmark_group("bootstrap");
    group.sample_size(10);

    let (a, y) = generate_crack_response(40, 42);

    for replicates in [100, 500, 1_000] {
        group.throughput(Throughput::Elements(replicates as u64));

        group.bench_with_input(
            BenchmarkId::new("run", replicates),
            &replicates,
            |b, &replicates| {
                b.iter(|| {
                    let mut estimator = Pod::new()
                        .detection(8.0)
                        .box_cox(Off)
                        .confidence_method(Bootstrap)
                        .simulation_size(replicates)
                        .seed(42)
                        .adapter(Estimator)
                        .build()
                        .unwrap();
                    estimator
                        .run(black_box(&a), black_box(&y))
                        .unwrap();
                    estimator
                })
            },
        );
    }
    group.finish();
}

fn bench_censoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("censoring");
    group.sample_size(50);

    let size = 1_000;
    let (a, y) = generate_censored_response(size, 42);

    group.bench_function("clean", |b| {
        b.iter(|| {
            Pod::new()
                .box_cox(Off)
                .adapter(Analysis)
                .build()
                .unwrap()
                .fit(black_box(&a), black_box(&y))
                .unwrap()
        })
    });

    group.bench_function("both_thresholds", |b| {
        b.iter(|| {
            Pod::new()
                .box_cox(Off)
                .noise_threshold(1.0)
                .saturation_threshold(7.0)
                .adapter(Analysis)
                .build()
                .unwrap()
                .fit(black_box(&a), black_box(&y))
                .unwrap()
        })
    });

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");
    group.sample_size(100);

    let (a, y) = generate_crack_response(200, 42);
    let mut estimator = Pod::new()
        .detection(8.0)
        .box_cox(Off)
        .adapter(Estimator)
        .build()
        .unwrap();
    estimator.run(&a, &y).unwrap();

    let grid: Vec<f64> = (1..=100).map(|i| i as f64 * 0.1).collect();

    group.bench_function("pod_table", |b| {
        b.iter(|| estimator.pod_table(black_box(&grid), Some(0.95)).unwrap())
    });

    group.bench_function("detection_size", |b| {
        b.iter(|| estimator.detection_size(black_box(0.90), 0.95).unwrap())
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_scalability,
    bench_box_cox,
    bench_residual_models,
    bench_bootstrap,
    bench_censoring,
    bench_queries,
);

criterion_main!(benches);
