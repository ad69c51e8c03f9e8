//! Benchmark for outlier detection and sequential cleaning
//!
//! Run with: cargo bench --bench outlier_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use polars::prelude::*;
use rand::prelude::*;
use rand::SeedableRng;

use sigmascope::pipeline::{clean, detect_outliers, detect_outliers_per_column};

/// Generate columns of mostly uniform noise with rare large spikes
fn generate_test_dataframe(n_rows: usize, n_cols: usize, seed: u64) -> DataFrame {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let columns: Vec<Column> = (0..n_cols)
        .map(|i| {
            let values: Vec<f64> = (0..n_rows)
                .map(|_| {
                    if rng.gen::<f64>() < 0.001 {
                        rng.gen::<f64>() * 1000.0
                    } else {
                        rng.gen::<f64>()
                    }
                })
                .collect();
            Column::new(format!("feature_{}", i).into(), values)
        })
        .collect();

    DataFrame::new(columns).unwrap()
}

fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect_outliers");

    for &rows in &[1_000usize, 10_000, 100_000] {
        let df = generate_test_dataframe(rows, 1, 42);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &df, |b, df| {
            b.iter(|| detect_outliers(black_box(df), "feature_0").unwrap())
        });
    }

    group.finish();
}

fn bench_clean_vs_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("multi_column");
    group.sample_size(20);

    let df = generate_test_dataframe(50_000, 8, 7);
    let columns: Vec<String> = (0..8).map(|i| format!("feature_{}", i)).collect();

    group.bench_function("clean_sequential", |b| {
        b.iter(|| clean(black_box(&df), &columns).unwrap())
    });
    group.bench_function("per_column_report", |b| {
        b.iter(|| detect_outliers_per_column(black_box(&df), &columns))
    });

    group.finish();
}

criterion_group!(benches, bench_detect, bench_clean_vs_report);
criterion_main!(benches);
