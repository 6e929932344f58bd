//! Output formatting for CLI commands.

use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
}

/// Renders rows as a table, or `None` when there are no rows.
pub fn render_table<T: Tabled>(data: &[T]) -> Option<String> {
    (!data.is_empty()).then(|| Table::new(data).to_string())
}

/// Print rows as a table.
pub fn print_table<T: Tabled>(data: &[T]) {
    match render_table(data) {
        Some(table) => println!("{table}"),
        None => println!("{}", "No items found.".dimmed()),
    }
}

/// Print a single value as JSON.
pub fn print_json<T: Serialize>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

pub fn print_success(message: &str) {
    println!("{} {}", "Success:".green().bold(), message);
}

pub fn print_warning(message: &str) {
    println!("{} {}", "Warning:".yellow().bold(), message);
}

/// Print an error and its causes.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);
    for cause in err.chain().skip(1) {
        eprintln!("  {} {}", "caused by:".dimmed(), cause);
    }
}
