//! Summary statistics for numeric columns

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;

use super::loader::numeric_columns;

/// Descriptive statistics for one numeric column.
///
/// All fields except `count` are `None` when the column has no values.
/// `std` is `None` for a single value (sample deviation undefined).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Describe every numeric column of `df` not listed in `exclude`
pub fn describe<S: AsRef<str>>(df: &DataFrame, exclude: &[S]) -> Result<Vec<ColumnSummary>> {
    numeric_columns(df, exclude)
        .iter()
        .map(|name| describe_column(df, name))
        .collect()
}

/// Describe a single numeric column. Null and NaN values are skipped.
pub fn describe_column(df: &DataFrame, column: &str) -> Result<ColumnSummary> {
    let col = df
        .column(column)
        .with_context(|| format!("Column '{}' not found in dataset", column))?;
    let float_col = col
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' cannot be read as numeric", column))?;

    let mut values: Vec<f64> = float_col
        .f64()?
        .iter()
        .flatten()
        .filter(|x| !x.is_nan())
        .collect();
    values.sort_by(|a, b| a.total_cmp(b));

    let count = values.len();
    if count == 0 {
        return Ok(ColumnSummary {
            column: column.to_string(),
            count,
            mean: None,
            std: None,
            min: None,
            q25: None,
            median: None,
            q75: None,
            max: None,
        });
    }

    let mean = values.iter().sum::<f64>() / count as f64;
    let std = (count > 1).then(|| {
        let sum_sq: f64 = values.iter().map(|x| (x - mean).powi(2)).sum();
        (sum_sq / (count - 1) as f64).sqrt()
    });

    Ok(ColumnSummary {
        column: column.to_string(),
        count,
        mean: Some(mean),
        std,
        min: values.first().copied(),
        q25: Some(percentile_sorted(&values, 0.25)),
        median: Some(percentile_sorted(&values, 0.50)),
        q75: Some(percentile_sorted(&values, 0.75)),
        max: values.last().copied(),
    })
}

/// Linearly interpolated percentile of an ascending, non-empty slice.
///
/// `p` is a fraction in `[0, 1]`.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let pos = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_interpolates() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert!((percentile_sorted(&v, 0.25) - 1.75).abs() < 1e-12);
        assert!((percentile_sorted(&v, 0.5) - 2.5).abs() < 1e-12);
        assert_eq!(percentile_sorted(&v, 0.0), 1.0);
        assert_eq!(percentile_sorted(&v, 1.0), 4.0);
    }

    #[test]
    fn test_single_value_has_no_std() {
        let df = df! { "x" => [Some(2.0f64), None] }.unwrap();
        let summary = describe_column(&df, "x").unwrap();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.std, None);
        assert_eq!(summary.median, Some(2.0));
    }
}
