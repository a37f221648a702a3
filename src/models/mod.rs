//! Core data structures for one fetch-aggregate-render cycle.

mod record;
mod report;

pub use record::{PaperRecord, PatentRecord, TrendPoint, TrendSeries, MISSING_FIELD};
pub use report::{FetchOutcome, InsightReport};
