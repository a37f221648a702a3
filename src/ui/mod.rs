//! CLI UI utilities: section headers, notices, and the fetch spinner.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::time::Duration;

/// Check if stdout is a terminal.
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Print a section header.
pub fn print_section(title: &str) {
    println!();
    println!("{}", format!("━━━ {} ━━━", title).bold().cyan());
}

/// Print a fallback notice for a degraded section.
pub fn notice(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Spinner shown while the three sources are in flight. Callers must
/// `finish_and_clear` it before rendering.
pub fn fetch_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Idle prompt shown when no query was provided.
pub fn print_idle_prompt() {
    println!("👆 Type a query and run again!");
    println!();
    println!("Example:");
    println!("  insight-scout scan \"quantum computing\"");
}
