//! Output formatting utilities.

use colored::Colorize;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;
use crate::error::CliResult;

/// Prints a list of rows in the requested format.
///
/// `Minimal` is handled by each command, so here it falls back to JSON lines.
pub fn print_rows<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
        OutputFormat::Minimal => {
            for item in data {
                println!("{}", serde_json::to_string(item)?);
            }
            Ok(())
        }
    }
}

/// Prints a serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints records as CSV with a header row.
pub fn print_csv<T: Serialize>(data: &[T]) -> CliResult<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

fn print_table<T: Tabled>(data: &[T]) -> CliResult<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{table}");
    Ok(())
}

/// Rounds half away from zero to `precision` places and renders with
/// trailing zeros kept.
pub fn format_fixed(value: f64, precision: u32) -> String {
    let width = precision as usize;
    match Decimal::from_f64_retain(value) {
        Some(d) => {
            let rounded = d.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.width$}")
        }
        None => format!("{value:.width$}"),
    }
}

/// Formats a fraction (0.0525) as a percentage ("5.25%").
pub fn format_percent(fraction: f64, precision: u32) -> String {
    format!("{}%", format_fixed(fraction * 100.0, precision))
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair with a fixed number of decimals.
    pub fn fixed(key: impl Into<String>, value: f64, precision: u32) -> Self {
        Self::new(key, format_fixed(value, precision))
    }

    /// Creates a key-value pair formatted as percentage.
    pub fn percent(key: impl Into<String>, fraction: f64, precision: u32) -> Self {
        Self::new(key, format_percent(fraction, precision))
    }
}
