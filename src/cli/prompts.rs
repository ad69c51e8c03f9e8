//! Interactive prompts using dialoguer

use std::path::Path;

use anyhow::Result;
use dialoguer::{Confirm, MultiSelect};

/// Let the user pick which numeric columns to check.
///
/// Every column starts selected. Returns the chosen names in frame order.
pub fn select_columns(available: &[String]) -> Result<Vec<String>> {
    let defaults = vec![true; available.len()];
    let chosen = MultiSelect::new()
        .with_prompt("Select columns to check for outliers (space toggles, enter confirms)")
        .items(available)
        .defaults(&defaults)
        .interact()?;

    Ok(chosen.into_iter().map(|i| available[i].clone()).collect())
}

/// Ask before replacing an existing file
pub fn confirm_overwrite(path: &Path) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(format!("{} already exists. Overwrite?", path.display()))
        .default(false)
        .interact()?;
    Ok(confirmed)
}
