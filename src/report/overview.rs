//! Tables for the dataset overview steps

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};

use crate::pipeline::{ColumnSummary, CorrelationMatrix, FactorImpact, MissingValueCount};

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

fn number_cell(value: Option<f64>) -> Cell {
    let text = match value {
        Some(v) if v.is_finite() => format!("{:.4}", v),
        _ => "-".to_string(),
    };
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Missing value counts, one row per column
pub fn display_missing(counts: &[MissingValueCount]) {
    let mut table = new_table(&["Column", "Missing", "Ratio"]);
    for c in counts {
        table.add_row(vec![
            Cell::new(&c.column),
            Cell::new(c.missing).fg(Color::Red),
            Cell::new(format!("{:.1}%", c.ratio * 100.0)),
        ]);
    }
    print_indented(&table);
}

/// Descriptive statistics, one row per column
pub fn display_summary_statistics(summaries: &[ColumnSummary]) {
    let mut table = new_table(&[
        "Column", "count", "mean", "std", "min", "25%", "50%", "75%", "max",
    ]);
    for s in summaries {
        table.add_row(vec![
            Cell::new(&s.column),
            Cell::new(s.count).set_alignment(CellAlignment::Right),
            number_cell(s.mean),
            number_cell(s.std),
            number_cell(s.min),
            number_cell(s.q25),
            number_cell(s.median),
            number_cell(s.q75),
            number_cell(s.max),
        ]);
    }
    print_indented(&table);
}

/// Full correlation matrix
pub fn display_correlation_matrix(matrix: &CorrelationMatrix) {
    let mut headers = vec![""];
    headers.extend(matrix.columns.iter().map(String::as_str));
    let mut table = new_table(&headers);

    for (i, name) in matrix.columns.iter().enumerate() {
        let mut row = vec![Cell::new(name).add_attribute(Attribute::Bold)];
        row.extend((0..matrix.len()).map(|j| number_cell(Some(matrix.values[(i, j)]))));
        table.add_row(row);
    }
    print_indented(&table);
}

/// Factor correlations and trendlines against the target
pub fn display_factor_impacts(target: &str, impacts: &[FactorImpact]) {
    let r_header = format!("r with {}", target);
    let mut table = new_table(&["Factor", &r_header, "Slope", "Intercept", "R²"]);
    for impact in impacts {
        let fit = impact.trendline;
        let r_cell = match impact.correlation {
            Some(r) if r > 0.0 => number_cell(Some(r)).fg(Color::Green),
            Some(r) => number_cell(Some(r)).fg(Color::Red),
            None => number_cell(None),
        };
        table.add_row(vec![
            Cell::new(&impact.factor),
            r_cell,
            number_cell(fit.map(|t| t.slope)),
            number_cell(fit.map(|t| t.intercept)),
            number_cell(fit.map(|t| t.r_squared)),
        ]);
    }
    print_indented(&table);
}
