//! Dataset loader for CSV and Parquet files

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

use crate::utils::{create_spinner, finish_with_success};

/// Open a dataset lazily (CSV or Parquet based on extension)
///
/// `infer_schema_length` of 0 means a full scan for CSV schema inference.
pub fn scan_dataset(path: &Path, infer_schema_length: usize) -> Result<LazyFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(schema_length)
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    Ok(lf)
}

/// Load a dataset fully into memory
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    scan_dataset(path, infer_schema_length)?
        .collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))
}

/// Load a dataset behind a spinner.
///
/// Returns the frame with its row count, column count and estimated size in MB.
pub fn load_dataset_with_progress(
    path: &Path,
    infer_schema_length: usize,
) -> Result<(DataFrame, usize, usize, f64)> {
    let spinner = create_spinner(&format!("Loading {}...", path.display()));
    let df = load_dataset(path, infer_schema_length)?;
    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);
    finish_with_success(&spinner, &format!("Loaded {} rows x {} columns", rows, cols));

    Ok((df, rows, cols, memory_mb))
}

/// Read only the column names of a dataset (schema scan, no data collected)
pub fn get_column_names(path: &Path) -> Result<Vec<String>> {
    let schema = scan_dataset(path, 100)?
        .collect_schema()
        .with_context(|| format!("Failed to read schema: {}", path.display()))?;

    Ok(schema.iter_names().map(|name| name.to_string()).collect())
}

/// Names of the primitive numeric columns in frame order, minus `exclude`
pub fn numeric_columns<S: AsRef<str>>(df: &DataFrame, exclude: &[S]) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| col.dtype().is_primitive_numeric())
        .map(|col| col.name().to_string())
        .filter(|name| !exclude.iter().any(|e| e.as_ref() == name))
        .collect()
}

/// Read a numeric column as `f64` values, with null and NaN mapped to `None`
pub fn column_as_f64(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>> {
    let col = df
        .column(column)
        .with_context(|| format!("Column '{}' not found in dataset", column))?;

    if !col.dtype().is_primitive_numeric() {
        anyhow::bail!("Column '{}' is not numeric (found {})", column, col.dtype());
    }

    let float_col = col.cast(&DataType::Float64)?;
    Ok(float_col
        .f64()?
        .iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}
