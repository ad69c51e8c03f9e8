//! Shared test utilities and fixture generators
#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// A slice of the 2018 happiness table.
///
/// Includes:
/// - `Overall rank`: integer rank (excluded from analysis by default)
/// - `Country or region`: text key
/// - six numeric factors plus `Score`
/// - one missing `Perceptions of corruption` value (United Arab Emirates)
pub fn create_happiness_dataframe() -> DataFrame {
    df! {
        "Overall rank" => [1i64, 2, 3, 4, 5, 6, 7, 8, 9, 10, 20, 156],
        "Country or region" => [
            "Finland", "Norway", "Denmark", "Iceland", "Switzerland", "Netherlands",
            "Canada", "New Zealand", "Sweden", "Australia", "United Arab Emirates", "Burundi",
        ],
        "Score" => [7.632f64, 7.594, 7.555, 7.495, 7.487, 7.441, 7.328, 7.324, 7.314, 7.272, 6.774, 2.905],
        "GDP per capita" => [1.305f64, 1.456, 1.351, 1.343, 1.420, 1.361, 1.330, 1.268, 1.355, 1.340, 2.096, 0.091],
        "Social support" => [1.592f64, 1.582, 1.590, 1.644, 1.549, 1.488, 1.532, 1.601, 1.501, 1.573, 0.776, 0.627],
        "Healthy life expectancy" => [0.874f64, 0.861, 0.868, 0.914, 0.927, 0.878, 0.896, 0.876, 0.913, 0.910, 0.670, 0.145],
        "Freedom to make life choices" => [0.681f64, 0.686, 0.683, 0.677, 0.660, 0.638, 0.653, 0.669, 0.659, 0.647, 0.284, 0.065],
        "Generosity" => [0.202f64, 0.286, 0.284, 0.353, 0.256, 0.333, 0.321, 0.365, 0.285, 0.361, 0.186, 0.149],
        "Perceptions of corruption" => [
            Some(0.393f64), Some(0.340), Some(0.408), Some(0.138), Some(0.357), Some(0.295),
            Some(0.291), Some(0.389), Some(0.383), Some(0.302), None, Some(0.076),
        ],
    }
    .unwrap()
}

/// The numeric columns of [`create_happiness_dataframe`] checked for outliers
pub fn happiness_check_columns() -> Vec<String> {
    [
        "Score",
        "GDP per capita",
        "Social support",
        "Healthy life expectancy",
        "Freedom to make life choices",
        "Generosity",
        "Perceptions of corruption",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// 19 identical values and one far spike at the end (row 19).
///
/// mean = 14.5, sample std ≈ 20.12, so 100.0 lies above mean + 3σ ≈ 74.87.
pub fn create_spike_dataframe() -> DataFrame {
    let mut x = vec![10.0f64; 19];
    x.push(100.0);
    let labels: Vec<String> = (0..20).map(|i| format!("row_{}", i)).collect();
    let ids: Vec<i64> = (0..20).collect();

    df! {
        "id" => ids,
        "label" => labels,
        "x" => x,
    }
    .unwrap()
}

/// Random numeric frame with occasional injected spikes and nulls
pub fn create_random_dataframe(rows: usize, cols: usize, seed: u64) -> DataFrame {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let mut columns: Vec<Column> = Vec::with_capacity(cols);
    for i in 0..cols {
        let values: Vec<Option<f64>> = (0..rows)
            .map(|_| {
                let roll: f64 = rng.gen();
                if roll < 0.02 {
                    None
                } else if roll < 0.04 {
                    Some(rng.gen_range(50.0..100.0))
                } else {
                    Some(rng.gen_range(-1.0..1.0))
                }
            })
            .collect();
        columns.push(Column::new(format!("c{}", i).into(), values));
    }

    DataFrame::new(columns).unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Read a numeric column back as `f64` values
pub fn column_values(df: &DataFrame, column: &str) -> Vec<Option<f64>> {
    df.column(column)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .iter()
        .collect()
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(
        rows, expected_rows,
        "Row count mismatch: expected {}, got {}",
        expected_rows, rows
    );
    assert_eq!(
        cols, expected_cols,
        "Column count mismatch: expected {}, got {}",
        expected_cols, cols
    );
}
