//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use quotaguard_core::types::{QuotaDecision, QuotaLimit};

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => print_json(items),
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(item: &T) {
    let json = serde_json::to_string_pretty(item).unwrap_or_else(|_| "null".to_string());
    println!("{json}");
}

/// Print a quota decision
pub fn print_decision(decision: &QuotaDecision, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(decision),
        OutputFormat::Table => {
            if decision.allowed {
                print_success("Allowed");
            } else {
                print_warning("Denied");
            }
            if let Some(reason) = &decision.reason {
                print_kv("Reason", reason);
            }
            print_kv("Current", &optional(decision.current));
            print_kv("Limit", &format_limit(decision.limit));
        }
    }
}

/// Render a raw limit, showing negatives as unlimited
pub fn format_limit(raw: i64) -> String {
    QuotaLimit::from(raw).to_string()
}

/// Render an optional value, showing `None` as a dash
pub fn optional<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{key}:"), value);
}
