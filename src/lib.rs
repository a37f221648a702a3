//! # Insight Scout
//!
//! A CLI for aggregating research insight about a topic: academic papers from
//! arXiv, granted patents from PatentsView, and 12-month search interest from
//! Google Trends, merged into terminal tables, a word-frequency chart, and a
//! CSV export.
//!
//! ## Architecture
//!
//! - [`models`]: Core data structures (PaperRecord, InsightReport, etc.)
//! - [`sources`]: One adapter per external service
//! - [`pipeline`]: Concurrent fan-out with per-source degradation
//! - [`export`]: Union-schema CSV artifact
//! - [`render`]: Tables, metric, word cloud, trend chart
//! - [`config`]: Configuration management
//! - [`utils`]: HTTP client, truncation, chart primitives
//!
//! Every source fetch is best-effort: a failure degrades that section to an
//! empty result plus a static notice and never affects the other sections.

pub mod config;
pub mod export;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod sources;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use models::{FetchOutcome, InsightReport, PaperRecord, PatentRecord, TrendSeries};
pub use pipeline::Pipeline;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
