//! Sigmascope: Dataset Exploration CLI Tool
//!
//! A command-line tool for exploring a tabular dataset and cleaning
//! statistical outliers with the mean ± 3σ rule.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use polars::prelude::*;

use sigmascope::cli::{confirm_overwrite, select_columns, Cli, Config};
use sigmascope::pipeline::{
    analyze_missing_values, compare_entities, correlation_matrix, default_selection, describe,
    factor_impacts, load_dataset_with_progress, numeric_columns, OutlierDetector, OutlierReport,
};
use sigmascope::report::{
    display_correlation_matrix, display_factor_impacts, display_missing,
    display_summary_statistics, export_analysis, AnalysisExport, CleaningSummary, ExportParams,
    OutlierRows,
};
use sigmascope::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_count, print_info, print_step_header, print_step_time, print_success,
    print_warning,
};

fn main() -> Result<()> {
    let mut config = Config::from(Cli::parse());

    print_banner(env!("CARGO_PKG_VERSION"));

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let (df, rows, cols, memory_mb) =
        load_dataset_with_progress(&config.input, config.infer_schema_length)?;

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);
    print_step_time(step_start.elapsed());

    let numeric = numeric_columns(&df, &config.exclude);
    if config.columns.is_empty() {
        config.columns = if config.interactive {
            select_columns(&numeric)?
        } else {
            numeric.clone()
        };
    }

    println!();
    print_config(&config);

    // Step 2: Missing values
    print_step_header(2, "Missing Data");
    let step_start = Instant::now();
    let missing = analyze_missing_values(&df)?;
    if missing.is_empty() {
        print_info("No missing values in the dataset");
    } else {
        print_count("column(s) with missing values", missing.len(), None);
        display_missing(&missing);
    }
    print_step_time(step_start.elapsed());

    // Step 3: Summary statistics
    print_step_header(3, "Summary Statistics");
    let step_start = Instant::now();
    let summaries = describe(&df, &config.exclude)?;
    display_summary_statistics(&summaries);
    print_step_time(step_start.elapsed());

    // Step 4: Outlier detection, one report per column
    print_step_header(4, "Outlier Detection");
    let step_start = Instant::now();
    let detector = OutlierDetector::new(config.sigma)?;
    let spinner = create_spinner(&format!(
        "Checking {} column(s) against mean ± {}σ...",
        config.columns.len(),
        config.sigma
    ));
    let outcomes = detector.detect_outliers_per_column(&df, &config.columns);
    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    if failed == 0 {
        finish_with_success(&spinner, "Outlier detection complete");
    } else {
        finish_with_warning(
            &spinner,
            &format!("Outlier detection complete, {} column(s) skipped", failed),
        );
    }

    for outcome in &outcomes {
        match &outcome.result {
            Ok(report) if report.is_empty() => {
                print_info(&format!("No outliers detected in '{}'.", outcome.column));
            }
            Ok(report) => {
                println!();
                println!(
                    "    Outliers in '{}' ({}):",
                    style(&outcome.column).yellow().bold(),
                    report.len()
                );
                println!("{}", report.rows);
            }
            Err(e) => print_warning(&format!("Skipping '{}': {}", outcome.column, e)),
        }
    }
    print_step_time(step_start.elapsed());

    // Step 5: Sequential cleaning over the columns that could be analyzed
    print_step_header(5, "Before and After Removing Outliers");
    let step_start = Instant::now();
    let analyzable: Vec<&str> = outcomes
        .iter()
        .filter(|o| o.result.is_ok())
        .map(|o| o.column.as_str())
        .collect();
    let cleaned = detector
        .clean(&df, &analyzable)
        .context("Cleaning aborted")?;

    println!("      Number of rows before removing outliers: {}", cleaned.original_rows);
    println!("      Number of rows after removing outliers: {}", cleaned.final_rows);

    let mut summary = CleaningSummary::new(config.sigma, rows);
    summary.add_checks(&outcomes);
    summary.set_cleaned(&cleaned);
    print_step_time(step_start.elapsed());

    // Step 6: Correlation and factor impact
    print_step_header(6, "Factor Analysis");
    let step_start = Instant::now();
    let matrix = correlation_matrix(&df, &numeric)?;
    if matrix.len() < 2 {
        print_info("Fewer than two numeric columns; nothing to correlate");
    } else {
        display_correlation_matrix(&matrix);
    }

    let factors: Vec<String> = numeric
        .iter()
        .filter(|c| Some(c.as_str()) != config.target.as_deref())
        .cloned()
        .collect();

    let impacts = match &config.target {
        Some(target) => match factor_impacts(&df, target, &factors) {
            Ok(impacts) => {
                println!();
                display_factor_impacts(target, &impacts);
                Some(impacts)
            }
            Err(e) => {
                print_warning(&format!("Skipping factor impact: {:#}", e));
                None
            }
        },
        None => {
            print_info("No target column given; skipping factor impact (use -t/--target)");
            None
        }
    };
    print_step_time(step_start.elapsed());

    // Step 7: Entity comparison
    print_step_header(7, "Comparison");
    let entities = if config.compare.is_empty() {
        default_selection(&df, &config.key_column)
    } else {
        Ok(config.compare.clone())
    };
    let comparison = entities.and_then(|entities| {
        if entities.is_empty() {
            return Ok(None);
        }
        print_info(&format!("Comparing {}", entities.join(", ")));
        compare_entities(&df, &config.key_column, &entities, &factors).map(Some)
    });
    match comparison {
        Ok(Some(comparison)) if comparison.height() == 0 => print_warning(&format!(
            "None of the selected values were found in '{}'",
            config.key_column
        )),
        Ok(Some(comparison)) => println!("{}", comparison),
        Ok(None) => print_info(&format!("No values in '{}' to compare", config.key_column)),
        Err(e) => print_warning(&format!("Skipping comparison: {:#}", e)),
    }

    // Step 8: Save results
    print_step_header(8, "Save Results");
    let step_start = Instant::now();
    let mut cleaned_df = cleaned.data;
    match &config.output {
        Some(path) => {
            if may_write(path, config.interactive)? {
                save_dataset(&mut cleaned_df, path)?;
                summary.set_applied(true);
                print_success(&format!("Cleaned dataset saved to {}", path.display()));
            } else {
                print_info(&format!("Kept existing {}", path.display()));
            }
        }
        None => print_info("No output path given; cleaned dataset not written"),
    }

    if let Some(path) = &config.report {
        if may_write(path, config.interactive)? {
            let input_file = config.input.display().to_string();
            let checked: Vec<String> = analyzable.iter().map(|c| c.to_string()).collect();
            let params = ExportParams {
                input_file: &input_file,
                rows,
                columns: cols,
                checked_columns: &checked,
            };
            let outlier_rows = outcomes
                .iter()
                .filter_map(|o| o.result.as_ref().ok())
                .map(|r| OutlierRows {
                    column: r.column.clone(),
                    row_indices: r.indices.clone(),
                    keys: outlier_keys(r, &config.key_column),
                })
                .collect();

            let mut export = AnalysisExport::new(
                &params,
                missing,
                summaries,
                summary.clone(),
                outlier_rows,
            );
            if let Some(impacts) = impacts {
                export = export.with_factor_impacts(impacts);
            }
            export_analysis(&export, path)?;
            print_success(&format!("Analysis report saved to {}", path.display()));
        }
    }
    print_step_time(step_start.elapsed());

    summary.display();
    print_completion();

    Ok(())
}

/// Whether `path` may be written, asking first if it exists and prompts are enabled
fn may_write(path: &Path, interactive: bool) -> Result<bool> {
    if interactive && path.exists() {
        confirm_overwrite(path)
    } else {
        Ok(true)
    }
}

/// Key column values of the outlier rows, if the key column is text
fn outlier_keys(report: &OutlierReport, key_column: &str) -> Option<Vec<String>> {
    let ca = report.rows.column(key_column).ok()?.str().ok()?;
    Some(
        ca.iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect(),
    )
}

/// Save dataset to file (CSV or Parquet based on extension)
fn save_dataset(df: &mut DataFrame, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "csv" => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            CsvWriter::new(&mut file)
                .finish(df)
                .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        }
        "parquet" => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            ParquetWriter::new(file)
                .finish(df)
                .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
        }
        _ => anyhow::bail!(
            "Unsupported output format: {}. Supported formats: csv, parquet",
            extension
        ),
    }

    Ok(())
}
