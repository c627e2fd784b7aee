//! Colored console output
//!
//! Uses owo-colors for terminal colors. Everything goes to stderr so that
//! stdout stays clean for `gae-sdk locate` and `gae-sdk env`.

use owo_colors::OwoColorize;

/// Print an action header (blue, bold)
/// Example: "==> Downloading App Engine SDK 1.9.56"
pub fn action(message: &str) {
    eprintln!("{} {}", "==>".blue().bold(), message.bold());
}

/// Print a detail line (dimmed prefix)
/// Example: "     extracting to ./appengine_sdk"
pub fn detail(message: &str) {
    eprintln!("     {}", message.dimmed());
}

/// Print a success message (green)
pub fn success(message: &str) {
    eprintln!("{} {}", "==>".green().bold(), message.green());
}

/// Print an info message (cyan)
pub fn info(message: &str) {
    eprintln!("{} {}", "::".cyan(), message);
}

/// Print a warning message (yellow)
pub fn warning(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message.yellow());
}
