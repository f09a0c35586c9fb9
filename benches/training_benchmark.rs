//! Benchmark for the Newton logistic regression fit and test-set attributions
//!
//! Run with: cargo bench --bench training_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use faer::Mat;
use rand::prelude::*;
use rand::SeedableRng;

use creditrisk::explain::explain;
use creditrisk::model::{LogisticConfig, LogisticRegression};

/// Standardized features with a linear log-odds signal on the first half of the columns
fn generate_training_data(n_rows: usize, n_features: usize, seed: u64) -> (Mat<f64>, Vec<f64>) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let x = Mat::from_fn(n_rows, n_features, |_, _| rng.gen::<f64>() * 2.0 - 1.0);

    let y: Vec<f64> = (0..n_rows)
        .map(|i| {
            let logit: f64 = (0..n_features / 2).map(|j| x[(i, j)]).sum::<f64>() - 0.5;
            let p = 1.0 / (1.0 + (-logit).exp());
            if rng.gen::<f64>() < p {
                1.0
            } else {
                0.0
            }
        })
        .collect();

    (x, y)
}

fn feature_names(n: usize) -> Vec<String> {
    (0..n).map(|j| format!("feature_{}", j)).collect()
}

fn bench_logistic_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("logistic_fit");
    group.sample_size(20);

    for &n_rows in &[1_000usize, 5_000, 24_000] {
        let n_features = 23;
        let (x, y) = generate_training_data(n_rows, n_features, 42);
        let names = feature_names(n_features);
        let config = LogisticConfig::default();

        group.throughput(Throughput::Elements(n_rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &n_rows, |b, _| {
            b.iter(|| {
                LogisticRegression::fit(black_box(&x), black_box(&y), &names, &config)
            })
        });
    }

    group.finish();
}

fn bench_attributions(c: &mut Criterion) {
    let n_features = 23;
    let (x, y) = generate_training_data(6_000, n_features, 7);
    let names = feature_names(n_features);
    let model = LogisticRegression::fit(&x, &y, &names, &LogisticConfig::default())
        .expect("benchmark model should fit");

    c.bench_function("explain_6000_rows", |b| {
        b.iter(|| explain(black_box(&model), names.clone(), x.clone()))
    });
}

criterion_group!(benches, bench_logistic_fit, bench_attributions);
criterion_main!(benches);
