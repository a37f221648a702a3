//! Record types for the three external sources.
//!
//! All records are created once per fetch cycle and never mutated; nothing
//! survives the cycle that produced it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Value used when a patent field is absent upstream.
pub const MISSING_FIELD: &str = "N/A";

/// An academic paper returned by the paper source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Paper title
    pub title: String,

    /// Author names in upstream order
    pub authors: Vec<String>,

    /// Publication date (RFC 3339, stringified)
    pub published: String,

    /// Abstract excerpt (first 200 characters + ellipsis)
    pub summary: String,

    /// Direct PDF URL
    pub pdf_url: String,
}

impl PaperRecord {
    /// Author names joined for display
    pub fn display_authors(&self) -> String {
        self.authors.join(", ")
    }
}

/// A granted patent returned by the patent source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatentRecord {
    /// Patent identifier
    pub id: String,

    /// Patent title, `"N/A"` when absent upstream
    pub title: String,

    /// Grant date, `"N/A"` when absent upstream
    pub date: String,
}

/// One point of the interest-over-time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Date of the sample
    pub date: NaiveDate,

    /// Relative interest, 0-100
    pub value: u32,
}

/// A time-indexed interest series for one keyword, possibly empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSeries {
    /// The keyword this series describes
    pub keyword: String,

    /// Samples in chronological order
    pub points: Vec<TrendPoint>,
}

impl TrendSeries {
    /// Create an empty series for a keyword
    pub fn empty(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            points: Vec::new(),
        }
    }

    /// Whether the series has no samples
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// The sample with the highest interest value
    pub fn peak(&self) -> Option<&TrendPoint> {
        self.points.iter().max_by_key(|p| p.value)
    }

    /// Raw values in chronological order
    pub fn values(&self) -> Vec<u32> {
        self.points.iter().map(|p| p.value).collect()
    }
}
