//! Outlier detection and removal using the mean ± k·stddev rule
//!
//! For a numeric column the bound is `(mean - k * std, mean + k * std)` where
//! `std` is the sample standard deviation (n - 1 denominator). A row is an
//! outlier for that column when its value lies strictly outside the bound and
//! an inlier when `lower <= value <= upper`. Missing values (null or NaN) are
//! excluded from the statistics and always count as inliers, so detection and
//! removal partition the dataset exactly. Infinite values are excluded from the
//! statistics too, but lie outside every finite bound and are reported.

use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::AnalysisError;

/// Multiplier applied to the standard deviation when none is configured.
pub const DEFAULT_SIGMA_MULTIPLIER: f64 = 3.0;

/// Mean and sample standard deviation of a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub column: String,
    /// Number of non-missing values the statistics were computed over
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
}

/// Inclusion region for typical values of a column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutlierBound {
    pub lower: f64,
    pub upper: f64,
}

impl OutlierBound {
    /// Build the symmetric bound `mean ± multiplier * std_dev`.
    pub fn from_stats(stats: &ColumnStats, multiplier: f64) -> Self {
        let spread = multiplier * stats.std_dev;
        Self {
            lower: stats.mean - spread,
            upper: stats.mean + spread,
        }
    }

    /// Inclusive membership test.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Rows of a dataset lying outside one column's bound.
#[derive(Debug, Clone)]
pub struct OutlierReport {
    pub column: String,
    pub stats: ColumnStats,
    pub bound: OutlierBound,
    /// Positions of the outlier rows in the analyzed dataset
    pub indices: Vec<usize>,
    /// The outlier rows themselves, in original order
    pub rows: DataFrame,
}

impl OutlierReport {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Outcome of checking a single column as part of a checklist.
#[derive(Debug)]
pub struct ColumnOutcome {
    pub column: String,
    pub result: Result<OutlierReport, AnalysisError>,
}

/// One filtering step of [`OutlierDetector::clean`].
#[derive(Debug, Clone, Serialize)]
pub struct CleaningStep {
    pub column: String,
    /// Bound computed on the rows that survived the previous steps
    pub bound: OutlierBound,
    pub rows_before: usize,
    pub rows_after: usize,
}

impl CleaningStep {
    pub fn rows_removed(&self) -> usize {
        self.rows_before - self.rows_after
    }
}

/// Result of sequentially removing outliers on several columns.
#[derive(Debug, Clone)]
pub struct CleanedDataset {
    pub data: DataFrame,
    pub original_rows: usize,
    pub final_rows: usize,
    pub steps: Vec<CleaningStep>,
}

impl CleanedDataset {
    pub fn rows_removed(&self) -> usize {
        self.original_rows - self.final_rows
    }
}

/// Stateless outlier analyzer parameterized by its deviation multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierDetector {
    sigma_multiplier: f64,
}

impl Default for OutlierDetector {
    fn default() -> Self {
        Self {
            sigma_multiplier: DEFAULT_SIGMA_MULTIPLIER,
        }
    }
}

impl OutlierDetector {
    /// Create a detector with a custom multiplier.
    ///
    /// The multiplier must be finite and strictly positive.
    pub fn new(sigma_multiplier: f64) -> Result<Self, AnalysisError> {
        if !sigma_multiplier.is_finite() || sigma_multiplier <= 0.0 {
            return Err(AnalysisError::InvalidMultiplier(sigma_multiplier));
        }
        Ok(Self { sigma_multiplier })
    }

    pub fn sigma_multiplier(&self) -> f64 {
        self.sigma_multiplier
    }

    /// Compute the bound for `column` together with the statistics it came from.
    pub fn bound(
        &self,
        df: &DataFrame,
        column: &str,
    ) -> Result<(ColumnStats, OutlierBound), AnalysisError> {
        let values = numeric_values(df, column)?;
        self.bound_from_values(column, &values)
    }

    fn bound_from_values(
        &self,
        column: &str,
        values: &[Option<f64>],
    ) -> Result<(ColumnStats, OutlierBound), AnalysisError> {
        let stats = stats_from_values(column, values)?;
        let bound = OutlierBound::from_stats(&stats, self.sigma_multiplier);
        Ok((stats, bound))
    }

    /// Return every row whose value in `column` is strictly outside the bound.
    pub fn detect_outliers(
        &self,
        df: &DataFrame,
        column: &str,
    ) -> Result<OutlierReport, AnalysisError> {
        let values = numeric_values(df, column)?;
        let (stats, bound) = self.bound_from_values(column, &values)?;
        let flags = outlier_flags(&values, &bound);

        let indices: Vec<usize> = flags
            .iter()
            .enumerate()
            .filter_map(|(i, &is_outlier)| is_outlier.then_some(i))
            .collect();

        let mask: BooleanChunked = flags.iter().copied().collect();
        let rows = df.filter(&mask)?;

        Ok(OutlierReport {
            column: column.to_string(),
            stats,
            bound,
            indices,
            rows,
        })
    }

    /// Return a new dataset with the rows whose value in `column` lies within
    /// the bound (inclusive). Exact complement of [`Self::detect_outliers`].
    pub fn remove_outliers(
        &self,
        df: &DataFrame,
        column: &str,
    ) -> Result<DataFrame, AnalysisError> {
        let values = numeric_values(df, column)?;
        let (_, bound) = self.bound_from_values(column, &values)?;
        filter_inliers(df, &values, &bound)
    }

    /// Remove outliers column by column, recomputing each bound on the output
    /// of the previous step.
    ///
    /// Fails on the first column that cannot be analyzed; no partially
    /// cleaned dataset is returned in that case.
    pub fn clean<S: AsRef<str>>(
        &self,
        df: &DataFrame,
        columns: &[S],
    ) -> Result<CleanedDataset, AnalysisError> {
        let original_rows = df.height();
        let mut current = df.clone();
        let mut steps = Vec::with_capacity(columns.len());

        for column in columns {
            let column = column.as_ref();
            let rows_before = current.height();
            let values = numeric_values(&current, column)?;
            let (_, bound) = self.bound_from_values(column, &values)?;
            current = filter_inliers(&current, &values, &bound)?;

            steps.push(CleaningStep {
                column: column.to_string(),
                bound,
                rows_before,
                rows_after: current.height(),
            });
        }

        let final_rows = current.height();
        Ok(CleanedDataset {
            data: current,
            original_rows,
            final_rows,
            steps,
        })
    }

    /// Run [`Self::detect_outliers`] for every column in `columns`.
    ///
    /// Columns are analyzed independently and in parallel; a failure on one
    /// column is recorded in its outcome and does not stop the others.
    /// Outcomes come back in the requested order.
    pub fn detect_outliers_per_column<S: AsRef<str> + Sync>(
        &self,
        df: &DataFrame,
        columns: &[S],
    ) -> Vec<ColumnOutcome> {
        columns
            .par_iter()
            .map(|column| {
                let column = column.as_ref();
                ColumnOutcome {
                    column: column.to_string(),
                    result: self.detect_outliers(df, column),
                }
            })
            .collect()
    }
}

/// Compute count, mean and sample standard deviation of a numeric column.
///
/// Null, NaN and infinite values are skipped. A single observation yields a
/// standard deviation of zero.
pub fn column_stats(df: &DataFrame, column: &str) -> Result<ColumnStats, AnalysisError> {
    let values = numeric_values(df, column)?;
    stats_from_values(column, &values)
}

fn stats_from_values(column: &str, values: &[Option<f64>]) -> Result<ColumnStats, AnalysisError> {
    let present: Vec<f64> = values
        .iter()
        .flatten()
        .copied()
        .filter(|x| x.is_finite())
        .collect();

    if present.is_empty() {
        return Err(AnalysisError::UndefinedStatistic {
            column: column.to_string(),
        });
    }

    let n = present.len();
    let mean = present.iter().sum::<f64>() / n as f64;
    let std_dev = if n > 1 {
        let sum_sq: f64 = present.iter().map(|x| (x - mean).powi(2)).sum();
        (sum_sq / (n - 1) as f64).sqrt()
    } else {
        0.0
    };

    Ok(ColumnStats {
        column: column.to_string(),
        count: n,
        mean,
        std_dev,
    })
}

/// Detect outliers on `column` with the default 3σ rule.
pub fn detect_outliers(df: &DataFrame, column: &str) -> Result<OutlierReport, AnalysisError> {
    OutlierDetector::default().detect_outliers(df, column)
}

/// Remove outliers on `column` with the default 3σ rule.
pub fn remove_outliers(df: &DataFrame, column: &str) -> Result<DataFrame, AnalysisError> {
    OutlierDetector::default().remove_outliers(df, column)
}

/// Sequentially clean `columns` with the default 3σ rule.
pub fn clean<S: AsRef<str>>(
    df: &DataFrame,
    columns: &[S],
) -> Result<CleanedDataset, AnalysisError> {
    OutlierDetector::default().clean(df, columns)
}

/// Per-column outlier report with the default 3σ rule.
pub fn detect_outliers_per_column<S: AsRef<str> + Sync>(
    df: &DataFrame,
    columns: &[S],
) -> Vec<ColumnOutcome> {
    OutlierDetector::default().detect_outliers_per_column(df, columns)
}

/// Extract a column as `f64` values, mapping null and NaN to `None`.
fn numeric_values(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>, AnalysisError> {
    let col = df.column(column).map_err(|_| AnalysisError::MissingColumn {
        column: column.to_string(),
    })?;

    if !col.dtype().is_primitive_numeric() {
        return Err(AnalysisError::InvalidColumnType {
            column: column.to_string(),
            dtype: col.dtype().to_string(),
        });
    }

    let float_col = col.cast(&DataType::Float64)?;
    let ca = float_col.f64()?;

    Ok(ca
        .iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

/// One flag per row: `true` when the row's value lies strictly outside `bound`.
fn outlier_flags(values: &[Option<f64>], bound: &OutlierBound) -> Vec<bool> {
    values
        .iter()
        .map(|v| v.is_some_and(|x| !bound.contains(x)))
        .collect()
}

fn filter_inliers(
    df: &DataFrame,
    values: &[Option<f64>],
    bound: &OutlierBound,
) -> Result<DataFrame, AnalysisError> {
    let mask: BooleanChunked = outlier_flags(values, bound)
        .into_iter()
        .map(|is_outlier| !is_outlier)
        .collect();
    Ok(df.filter(&mask)?)
}
