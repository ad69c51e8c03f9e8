//! Outlier cleaning summary report

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;
use serde::Serialize;

use crate::pipeline::{CleanedDataset, CleaningStep, ColumnOutcome, OutlierBound};

/// Detection result for one checked column
#[derive(Debug, Clone, Serialize)]
pub struct ColumnCheck {
    pub column: String,
    /// Number of outlier rows, `None` if the column could not be analyzed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outliers: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bound: Option<OutlierBound>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary of outlier detection and cleaning
#[derive(Debug, Clone, Default, Serialize)]
pub struct CleaningSummary {
    pub sigma: f64,
    pub rows_before: usize,
    pub rows_after: usize,
    pub checks: Vec<ColumnCheck>,
    pub steps: Vec<CleaningStep>,
    /// Whether the cleaned dataset was written out
    pub applied: bool,
}

impl CleaningSummary {
    pub fn new(sigma: f64, rows: usize) -> Self {
        Self {
            sigma,
            rows_before: rows,
            rows_after: rows,
            ..Default::default()
        }
    }

    pub fn add_checks(&mut self, outcomes: &[ColumnOutcome]) {
        self.checks = outcomes
            .iter()
            .map(|outcome| match &outcome.result {
                Ok(report) => ColumnCheck {
                    column: outcome.column.clone(),
                    outliers: Some(report.len()),
                    bound: Some(report.bound),
                    error: None,
                },
                Err(e) => ColumnCheck {
                    column: outcome.column.clone(),
                    outliers: None,
                    bound: None,
                    error: Some(e.to_string()),
                },
            })
            .collect();
    }

    pub fn set_cleaned(&mut self, cleaned: &CleanedDataset) {
        self.rows_before = cleaned.original_rows;
        self.rows_after = cleaned.final_rows;
        self.steps = cleaned.steps.clone();
    }

    pub fn set_applied(&mut self, applied: bool) {
        self.applied = applied;
    }

    pub fn rows_removed(&self) -> usize {
        self.rows_before - self.rows_after
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("OUTLIER SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Column").add_attribute(Attribute::Bold),
            Cell::new("Outliers").add_attribute(Attribute::Bold),
            Cell::new("Lower bound").add_attribute(Attribute::Bold),
            Cell::new("Upper bound").add_attribute(Attribute::Bold),
        ]);

        for check in &self.checks {
            let outliers = match check.outliers {
                Some(0) => Cell::new(0).fg(Color::White),
                Some(n) => Cell::new(n).fg(Color::Red),
                None => Cell::new("skipped").fg(Color::Yellow),
            };
            let (lower, upper) = match check.bound {
                Some(b) => (format!("{:.4}", b.lower), format!("{:.4}", b.upper)),
                None => ("-".to_string(), "-".to_string()),
            };
            table.add_row(vec![
                Cell::new(&check.column),
                outliers.set_alignment(CellAlignment::Right),
                Cell::new(lower).set_alignment(CellAlignment::Right),
                Cell::new(upper).set_alignment(CellAlignment::Right),
            ]);
        }

        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        let mut rows = Table::new();
        rows.load_preset(UTF8_FULL_CONDENSED);
        rows.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);
        rows.add_row(vec![Cell::new("Rows before cleaning"), Cell::new(self.rows_before)]);
        rows.add_row(vec![
            Cell::new("Rows removed"),
            Cell::new(self.rows_removed()).fg(if self.rows_removed() == 0 {
                Color::White
            } else {
                Color::Red
            }),
        ]);
        rows.add_row(vec![
            Cell::new("Rows after cleaning"),
            Cell::new(self.rows_after)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        rows.add_row(vec![
            Cell::new("Sigma multiplier"),
            Cell::new(format!("{:.2}", self.sigma)),
        ]);

        println!();
        for line in rows.to_string().lines() {
            println!("    {}", line);
        }

        if !self.applied {
            println!();
            println!(
                "    {}",
                style("The cleaned dataset was not applied; all rows remain in the source data.")
                    .dim()
            );
        }
    }
}
