//! Terminal chart primitives: sparklines and horizontal bars.
//!
//! The trend series renders as a unicode sparkline and the word-frequency
//! list as a scaled bar chart, both plain strings the renderer composes.

/// Block glyphs from lowest to highest.
const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render a sequence of values as a one-line sparkline.
///
/// Values are scaled against the series maximum; an all-zero series renders
/// as a flat baseline.
pub fn sparkline(values: &[u32]) -> String {
    let max = values.iter().copied().max().unwrap_or(0);
    values
        .iter()
        .map(|&v| {
            if max == 0 {
                LEVELS[0]
            } else {
                // Scale into 0..=7
                let idx = (v as usize * (LEVELS.len() - 1)) / max as usize;
                LEVELS[idx]
            }
        })
        .collect()
}

/// Render a horizontal bar of `count` scaled against `max` into `width` cells.
///
/// Any non-zero count renders at least one cell so small values stay visible.
pub fn bar(count: usize, max: usize, width: usize) -> String {
    if max == 0 || width == 0 || count == 0 {
        return String::new();
    }
    let cells = ((count * width) / max).max(1).min(width);
    "█".repeat(cells)
}
