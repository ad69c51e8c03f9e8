//! Error types for the outlier analyzer.
//!
//! Every variant names the column it concerns so that callers iterating a
//! checklist of columns can report which one failed and decide whether to
//! keep going.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while computing column statistics, detecting outliers or
/// cleaning a dataset.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The requested column does not exist in the dataset.
    #[error("Column '{column}' not found in dataset")]
    MissingColumn {
        /// Name of the requested column
        column: String,
    },

    /// The column has no non-missing numeric values, so mean and standard
    /// deviation are undefined.
    #[error("Column '{column}' has no non-missing numeric values; mean and standard deviation are undefined")]
    UndefinedStatistic {
        /// Name of the offending column
        column: String,
    },

    /// The column exists but is not numeric.
    #[error("Column '{column}' is not numeric (found {dtype})")]
    InvalidColumnType {
        /// Name of the offending column
        column: String,
        /// Display form of the column's actual data type
        dtype: String,
    },

    /// The deviation multiplier must be a finite positive number.
    #[error("Sigma multiplier must be a finite number greater than zero, got {0}")]
    InvalidMultiplier(f64),

    /// Frame-level failure from polars (casting, filtering).
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

impl AnalysisError {
    /// Column the error refers to, if any.
    pub fn column(&self) -> Option<&str> {
        match self {
            AnalysisError::MissingColumn { column }
            | AnalysisError::UndefinedStatistic { column }
            | AnalysisError::InvalidColumnType { column, .. } => Some(column),
            AnalysisError::InvalidMultiplier(_) | AnalysisError::Polars(_) => None,
        }
    }
}
