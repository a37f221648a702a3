//! Terminal display utilities for robust CLI output formatting.
//!
//! Unicode-aware truncation helpers shared by the table renderer and the
//! summary-excerpt logic in the paper adapter.

use terminal_size::terminal_size;

/// Default width when terminal size cannot be determined.
pub const DEFAULT_WIDTH: usize = 100;

/// Get the current terminal width in characters.
pub fn terminal_width() -> usize {
    terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(DEFAULT_WIDTH)
}

/// Truncate text to fit within the specified display width.
///
/// Unicode-aware: wide characters count for their rendered width. Appends an
/// ellipsis when truncation occurred.
///
/// # Examples
///
/// ```
/// use insight_scout::utils::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("Hello World", 8), "Hello...");
/// assert_eq!(truncate_with_ellipsis("Hi", 8), "Hi");
/// ```
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let char_widths: Vec<(char, usize)> = text
        .chars()
        .map(|c| (c, unicode_width::UnicodeWidthChar::width(c).unwrap_or(1)))
        .collect();

    let total_width: usize = char_widths.iter().map(|(_, w)| *w).sum();

    if total_width <= max_width {
        return text.to_string();
    }

    let mut current_width = 0;
    let mut end_idx = 0;

    for (i, (_c, w)) in char_widths.iter().enumerate() {
        if current_width + w > max_width.saturating_sub(3) {
            // Leave room for the ellipsis
            break;
        }
        current_width += w;
        end_idx = i + 1;
    }

    if end_idx == 0 {
        return "...".to_string();
    }

    let truncated: String = char_widths[..end_idx].iter().map(|(c, _)| *c).collect();
    format!("{}...", truncated)
}

/// Build a summary excerpt: the first `max_chars` characters with `"..."`
/// appended.
///
/// The cut is char-based so multibyte abstracts can never split a UTF-8
/// scalar. The ellipsis is appended unconditionally, matching the upstream
/// presentation of abstracts as excerpts.
pub fn summary_excerpt(text: &str, max_chars: usize) -> String {
    let head: String = text.chars().take(max_chars).collect();
    format!("{}...", head)
}
