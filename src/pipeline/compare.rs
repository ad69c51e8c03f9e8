//! Side-by-side comparison of selected entities (e.g. countries)

use std::collections::HashSet;

use anyhow::{Context, Result};
use polars::prelude::*;

/// Number of entities selected when the caller gives none
pub const DEFAULT_COMPARISON_SIZE: usize = 3;

/// Distinct values of a text key column, in first-seen order. Nulls are skipped.
pub fn unique_values(df: &DataFrame, key_column: &str) -> Result<Vec<String>> {
    let values = key_values(df, key_column)?;
    let mut seen = HashSet::new();

    Ok(values
        .into_iter()
        .flatten()
        .filter(|v| seen.insert(v.clone()))
        .collect())
}

/// The first [`DEFAULT_COMPARISON_SIZE`] distinct entities of `key_column`
pub fn default_selection(df: &DataFrame, key_column: &str) -> Result<Vec<String>> {
    let mut values = unique_values(df, key_column)?;
    values.truncate(DEFAULT_COMPARISON_SIZE);
    Ok(values)
}

/// Rows whose key is one of `entities`, projected onto `[key_column] + factors`.
///
/// Original row order is kept. Entities that do not occur are ignored; an
/// empty selection is an error.
pub fn compare_entities<S: AsRef<str>, F: AsRef<str>>(
    df: &DataFrame,
    key_column: &str,
    entities: &[S],
    factors: &[F],
) -> Result<DataFrame> {
    if entities.is_empty() {
        anyhow::bail!("Select at least one value of '{}' to compare", key_column);
    }

    let wanted: HashSet<&str> = entities.iter().map(|e| e.as_ref()).collect();
    let keys = key_values(df, key_column)?;
    let mask: BooleanChunked = keys
        .iter()
        .map(|k| k.as_deref().is_some_and(|k| wanted.contains(k)))
        .collect();

    let mut selected: Vec<&str> = vec![key_column];
    selected.extend(factors.iter().map(|f| f.as_ref()));

    let projected = df
        .select(selected.iter().copied())
        .with_context(|| format!("Failed to select comparison columns: {:?}", selected))?;

    Ok(projected.filter(&mask)?)
}

fn key_values(df: &DataFrame, key_column: &str) -> Result<Vec<Option<String>>> {
    let col = df
        .column(key_column)
        .with_context(|| format!("Key column '{}' not found in dataset", key_column))?;

    let ca = col
        .str()
        .with_context(|| format!("Key column '{}' must be a text column", key_column))?;

    Ok(ca.iter().map(|v| v.map(str::to_string)).collect())
}
