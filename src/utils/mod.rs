//! Utility modules supporting the fetch-aggregate-render cycle.
//!
//! - [`HttpClient`]: shared HTTP client with bounded timeouts
//! - [`truncate_with_ellipsis`] / [`summary_excerpt`]: unicode-aware text trimming
//! - [`sparkline`] / [`bar`]: terminal chart primitives

mod chart;
mod display;
mod http;

pub use chart::{bar, sparkline};
pub use display::{summary_excerpt, terminal_width, truncate_with_ellipsis, DEFAULT_WIDTH};
pub use http::HttpClient;
