//! Missing value analysis

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

/// Missing value count for a single column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingValueCount {
    pub column: String,
    pub missing: usize,
    /// `missing / rows`
    pub ratio: f64,
}

/// Count missing values per column, keeping only columns with at least one.
///
/// Nulls count as missing in every column; NaN also counts in float columns.
/// Results are sorted by missing count descending, ties keeping frame order.
pub fn analyze_missing_values(df: &DataFrame) -> Result<Vec<MissingValueCount>> {
    let rows = df.height();
    if rows == 0 {
        return Ok(Vec::new());
    }

    let mut counts: Vec<MissingValueCount> = Vec::new();

    for column in df.get_columns() {
        let mut missing = column.null_count();

        if column.dtype().is_float() {
            let ca = column.cast(&DataType::Float64)?;
            missing += ca
                .f64()?
                .iter()
                .filter(|v| v.is_some_and(f64::is_nan))
                .count();
        }

        if missing > 0 {
            counts.push(MissingValueCount {
                column: column.name().to_string(),
                missing,
                ratio: missing as f64 / rows as f64,
            });
        }
    }

    counts.sort_by(|a, b| b.missing.cmp(&a.missing));

    Ok(counts)
}

/// Total number of missing cells across the whole frame
pub fn total_missing(counts: &[MissingValueCount]) -> usize {
    counts.iter().map(|c| c.missing).sum()
}
