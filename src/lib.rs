//! Sigmascope: Dataset Exploration Library
//!
//! A library for exploring tabular datasets: missing value and summary
//! statistics, correlation and factor analysis, entity comparison, and
//! statistical outlier detection and cleaning with the mean ± 3σ rule.

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use error::AnalysisError;
