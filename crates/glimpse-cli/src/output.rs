//! Terminal output formatting for the glimpse CLI.
//!
//! Provides consistent, colored output using the [`console`] crate. Status
//! lines go to stderr so `glimpse render` can stream the contract to stdout.

use console::style;

/// Print a bold cyan header with an underline separator.
pub fn print_header(text: &str) {
    eprintln!("\n{}", style(text).bold().cyan());
    eprintln!("{}", style("=".repeat(text.len())).dim());
}

/// Print a success message prefixed with green `[OK]`.
pub fn print_success(text: &str) {
    eprintln!("{} {}", style("[OK]").green().bold(), text);
}

/// Print a warning message prefixed with yellow `[WARN]`.
pub fn print_warning(text: &str) {
    eprintln!("{} {}", style("[WARN]").yellow().bold(), text);
}

/// Print a progress step indicator like `[1/3] Formatting study...`.
pub fn print_step(step: u32, total: u32, text: &str) {
    eprintln!("{} {}", style(format!("[{step}/{total}]")).dim(), text);
}

/// Print a key-value pair with dimmed key formatting.
pub fn print_key_value(key: &str, value: &str) {
    eprintln!("  {}: {}", style(key).dim(), value);
}
