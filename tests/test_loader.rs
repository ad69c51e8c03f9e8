//! Unit tests for dataset loader

use polars::prelude::*;
use sigmascope::pipeline::{get_column_names, load_dataset, load_dataset_with_progress};
use std::io::Write;
use tempfile::TempDir;

mod common;

#[test]
fn test_load_csv_file() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "Country or region,Score,Generosity").unwrap();
    writeln!(file, "Finland,7.632,0.202").unwrap();
    writeln!(file, "Norway,7.594,0.286").unwrap();
    drop(file);

    let (df, rows, cols, mem_mb) = load_dataset_with_progress(&csv_path, 100).unwrap();

    assert_eq!(rows, 2, "Should have 2 data rows");
    assert_eq!(cols, 3, "Should have 3 columns");
    assert_eq!(df.get_column_names(), &["Country or region", "Score", "Generosity"]);
    assert_eq!(df.column("Score").unwrap().dtype(), &DataType::Float64);
    assert!(mem_mb >= 0.0, "Memory estimate should be non-negative");
}

#[test]
fn test_load_csv_with_empty_cell_is_null() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("gaps.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "a,b").unwrap();
    writeln!(file, "1.0,").unwrap();
    writeln!(file, "2.0,0.5").unwrap();
    drop(file);

    let df = load_dataset(&csv_path, 100).unwrap();
    assert_eq!(df.column("b").unwrap().null_count(), 1);
}

#[test]
fn test_load_parquet_roundtrips_fixture() {
    let mut df = common::create_happiness_dataframe();
    let (_temp_dir, parquet_path) = common::create_temp_parquet(&mut df);

    let (loaded, rows, cols, _mem) = load_dataset_with_progress(&parquet_path, 100).unwrap();

    common::assert_shape(&loaded, rows, cols);
    assert_eq!(rows, 12);
    assert_eq!(cols, 9);
    assert!(loaded.equals_missing(&df));
}

#[test]
fn test_get_column_names_csv() {
    let mut df = common::create_happiness_dataframe();
    let (_temp_dir, csv_path) = common::create_temp_csv(&mut df);

    let names = get_column_names(&csv_path).unwrap();
    assert_eq!(names.len(), 9);
    assert_eq!(names[0], "Overall rank");
    assert_eq!(names[1], "Country or region");
}

#[test]
fn test_unsupported_format() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.json");
    std::fs::write(&path, "{}").unwrap();

    let result = load_dataset(&path, 100);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Unsupported file format"));
}

#[test]
fn test_missing_file_errors() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.csv");
    assert!(load_dataset(&path, 100).is_err());
}
