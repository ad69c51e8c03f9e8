//! JSON export of an analysis run

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{ColumnSummary, FactorImpact, MissingValueCount};

use super::summary::CleaningSummary;

/// Metadata about the analysis run
#[derive(Serialize)]
pub struct AnalysisMetadata {
    /// Timestamp of the analysis (ISO 8601 format)
    pub timestamp: String,
    /// Sigmascope version
    pub sigmascope_version: String,
    /// Input file path
    pub input_file: String,
    pub rows: usize,
    pub columns: usize,
    /// Columns checked for outliers, in cleaning order
    pub checked_columns: Vec<String>,
}

/// Outlier rows of one column, identified by position and key
#[derive(Serialize)]
pub struct OutlierRows {
    pub column: String,
    pub row_indices: Vec<usize>,
    /// Values of the key column for the outlier rows, when available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
}

/// Complete analysis export
#[derive(Serialize)]
pub struct AnalysisExport {
    pub metadata: AnalysisMetadata,
    pub missing_values: Vec<MissingValueCount>,
    pub summary_statistics: Vec<ColumnSummary>,
    pub outliers: CleaningSummary,
    pub outlier_rows: Vec<OutlierRows>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor_impacts: Option<Vec<FactorImpact>>,
}

/// Parameters describing the run, used for metadata
pub struct ExportParams<'a> {
    pub input_file: &'a str,
    pub rows: usize,
    pub columns: usize,
    pub checked_columns: &'a [String],
}

impl AnalysisExport {
    pub fn new(
        params: &ExportParams,
        missing_values: Vec<MissingValueCount>,
        summary_statistics: Vec<ColumnSummary>,
        outliers: CleaningSummary,
        outlier_rows: Vec<OutlierRows>,
    ) -> Self {
        Self {
            metadata: AnalysisMetadata {
                timestamp: Utc::now().to_rfc3339(),
                sigmascope_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: params.input_file.to_string(),
                rows: params.rows,
                columns: params.columns,
                checked_columns: params.checked_columns.to_vec(),
            },
            missing_values,
            summary_statistics,
            outliers,
            outlier_rows,
            factor_impacts: None,
        }
    }

    pub fn with_factor_impacts(mut self, impacts: Vec<FactorImpact>) -> Self {
        self.factor_impacts = Some(impacts);
        self
    }
}

/// Write the analysis export as pretty-printed JSON
pub fn export_analysis(export: &AnalysisExport, output_path: &Path) -> Result<()> {
    let json =
        serde_json::to_string_pretty(export).context("Failed to serialize analysis to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write analysis report to {}", output_path.display()))?;

    Ok(())
}
