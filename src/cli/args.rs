//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::DEFAULT_SIGMA_MULTIPLIER;

/// Sigmascope - Explore a tabular dataset and clean statistical outliers
#[derive(Parser, Debug)]
#[command(name = "sigmascope")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Numeric columns to check for outliers (comma-separated).
    /// If not provided, columns are selected interactively, or every
    /// numeric column is checked when --no-confirm is set.
    #[arg(short, long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Numeric columns that are never checked or described (comma-separated)
    #[arg(long, value_delimiter = ',', default_value = "Overall rank")]
    pub exclude: Vec<String>,

    /// Standard deviation multiplier k for the mean ± k·σ outlier bound
    #[arg(long, default_value_t = DEFAULT_SIGMA_MULTIPLIER, value_parser = validate_sigma)]
    pub sigma: f64,

    /// Target column for factor impact analysis (e.g. "Score").
    /// The step is skipped when not provided.
    #[arg(short, long)]
    pub target: Option<String>,

    /// Text column identifying each row, used for entity comparison
    #[arg(long, default_value = "Country or region")]
    pub key_column: String,

    /// Entities to compare side by side (comma-separated values of --key-column).
    /// Defaults to the first three distinct values of the key column.
    #[arg(long, value_delimiter = ',')]
    pub compare: Vec<String>,

    /// Write the cleaned dataset to this path (CSV or Parquet, by extension).
    /// Without it the cleaning result is reported but not applied.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write a JSON analysis report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Skip interactive prompts
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

/// Settings the analysis pipeline runs with, resolved from the command line
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    /// Columns to check; empty means every numeric column not excluded
    pub columns: Vec<String>,
    pub exclude: Vec<String>,
    pub sigma: f64,
    pub target: Option<String>,
    pub key_column: String,
    pub compare: Vec<String>,
    pub output: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub interactive: bool,
    pub infer_schema_length: usize,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            input: cli.input,
            columns: cli.columns,
            exclude: cli.exclude,
            sigma: cli.sigma,
            target: cli.target,
            key_column: cli.key_column,
            compare: cli.compare,
            output: cli.output,
            report: cli.report,
            interactive: !cli.no_confirm,
            infer_schema_length: cli.infer_schema_length,
        }
    }
}

/// Validator for the sigma multiplier
fn validate_sigma(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !value.is_finite() || value <= 0.0 {
        Err(format!("sigma must be a finite number greater than 0, got {}", value))
    } else {
        Ok(value)
    }
}
