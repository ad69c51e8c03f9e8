//! Terminal styling utilities

use console::{style, Emoji};

use crate::cli::Config;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static SIGMA: Emoji<'_, '_> = Emoji("σ ", "");
pub static COLUMNS: Emoji<'_, '_> = Emoji("📊 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");

const BOX_WIDTH: usize = 56;

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {} {}",
        style("Σ sigmascope").cyan().bold(),
        style("explore a dataset, flag what sits beyond 3σ").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the resolved configuration card
pub fn print_config(config: &Config) {
    let line = "─".repeat(BOX_WIDTH - 2);
    let columns = if config.columns.is_empty() {
        "(all numeric)".to_string()
    } else {
        format!("{} selected", config.columns.len())
    };
    let output = config
        .output
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not written)".to_string());

    println!("    ┌{}┐", line);
    println!("    │ {:<w$}│", style("Configuration").cyan().bold(), w = BOX_WIDTH - 3);
    println!("    ├{}┤", line);
    println!(
        "    │  {}Input:   {:<38}│",
        FOLDER,
        truncate_string(&config.input.display().to_string(), 38)
    );
    println!("    │  {}Columns: {:<38}│", COLUMNS, truncate_string(&columns, 38));
    println!("    │  {}Output:  {:<38}│", SAVE, truncate_string(&output, 38));
    println!("    ├{}┤", line);
    println!(
        "    │  {}Sigma multiplier: {:<29}│",
        SIGMA,
        style(format!("{:.2}", config.sigma)).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {}{}", INFO, message);
}

/// Print a non-fatal warning to stderr
pub fn print_warning(message: &str) {
    eprintln!("    {}{}", WARN, style(message).yellow());
}

/// Print the elapsed time of a step
pub fn print_step_time(elapsed: std::time::Duration) {
    println!(
        "    {}",
        style(format!("({:.2}s)", elapsed.as_secs_f64())).dim()
    );
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {}{}",
        ROCKET,
        style("Sigmascope analysis complete!").green().bold()
    );
    println!();
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize, detail: Option<&str>) {
    if let Some(detail) = detail {
        println!(
            "      Found {} {} {}",
            style(count).yellow().bold(),
            description,
            style(detail).dim()
        );
    } else {
        println!("      Found {} {}", style(count).yellow().bold(), description);
    }
}

/// Shorten a string from the left so it fits in `max_len` characters
pub fn truncate_string(s: &str, max_len: usize) -> String {
    let len = s.chars().count();
    if len <= max_len {
        s.to_string()
    } else {
        let tail: String = s.chars().skip(len - max_len + 3).collect();
        format!("...{}", tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_short_strings() {
        assert_eq!(truncate_string("data.csv", 38), "data.csv");
    }

    #[test]
    fn test_truncate_keeps_tail() {
        let out = truncate_string("/very/long/path/to/data.csv", 12);
        assert_eq!(out.chars().count(), 12);
        assert!(out.starts_with("..."));
        assert!(out.ends_with("data.csv"));
    }
}
