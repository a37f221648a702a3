//! Per-cycle report types: fetch outcomes and the aggregated insight report.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::models::{PaperRecord, PatentRecord, TrendSeries};
use crate::sources::SourceError;

/// Outcome of one adapter's fetch.
///
/// Every failure degrades to an empty section plus a static notice, but the
/// presenter can still distinguish zero matches (`Fetched` of an empty
/// collection) from an upstream failure (`Unavailable`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FetchOutcome<T> {
    /// The source responded; the payload may legitimately be empty.
    Fetched { records: T },

    /// The source failed; the section shows this notice instead of data.
    Unavailable { notice: String },
}

impl<T> FetchOutcome<T> {
    /// Collapse an adapter result into an outcome, degrading errors to the
    /// given fallback notice.
    pub fn from_result(result: Result<T, SourceError>, notice: &str) -> Self {
        match result {
            Ok(records) => Self::Fetched { records },
            Err(_) => Self::Unavailable {
                notice: notice.to_string(),
            },
        }
    }

    /// The fetched payload, if the source responded
    pub fn fetched(&self) -> Option<&T> {
        match self {
            Self::Fetched { records } => Some(records),
            Self::Unavailable { .. } => None,
        }
    }

    /// The fallback notice, if the source failed
    pub fn notice(&self) -> Option<&str> {
        match self {
            Self::Fetched { .. } => None,
            Self::Unavailable { notice } => Some(notice),
        }
    }

    /// Whether the source failed
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Everything one fetch cycle produced, consumed by the presenter and the
/// CSV exporter. Derived per cycle, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightReport {
    /// The query that triggered this cycle
    pub query: String,

    /// Papers from the academic source
    pub papers: FetchOutcome<Vec<PaperRecord>>,

    /// Patents from the patent source
    pub patents: FetchOutcome<Vec<PatentRecord>>,

    /// Interest-over-time from the trend source
    pub trends: FetchOutcome<TrendSeries>,
}

/// Words excluded from the title word-frequency analysis.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "based", "by", "for", "from", "in", "into", "is", "its",
    "of", "on", "or", "the", "their", "to", "toward", "towards", "using", "via", "with",
];

fn word_pattern() -> &'static regex::Regex {
    static PATTERN: OnceLock<regex::Regex> = OnceLock::new();
    PATTERN.get_or_init(|| regex::Regex::new(r"[a-z][a-z'\-]+").unwrap())
}

impl InsightReport {
    /// Number of papers fetched; a failed source contributes zero
    pub fn paper_count(&self) -> usize {
        self.papers.fetched().map_or(0, |p| p.len())
    }

    /// Number of patents fetched; a failed source contributes zero
    pub fn patent_count(&self) -> usize {
        self.patents.fetched().map_or(0, |p| p.len())
    }

    /// The headline metric: papers + patents, independent of the trend outcome
    pub fn total_insights(&self) -> usize {
        self.paper_count() + self.patent_count()
    }

    /// All paper and patent titles joined into one blob, the word-cloud input
    pub fn title_text(&self) -> String {
        let mut titles: Vec<&str> = Vec::new();
        if let Some(papers) = self.papers.fetched() {
            titles.extend(papers.iter().map(|p| p.title.as_str()));
        }
        if let Some(patents) = self.patents.fetched() {
            titles.extend(patents.iter().map(|p| p.title.as_str()));
        }
        titles.join(" ")
    }

    /// Word frequencies over the combined titles, highest count first
    /// (ties broken alphabetically). Empty when there are no titles.
    pub fn word_frequencies(&self) -> Vec<(String, usize)> {
        let text = self.title_text().to_lowercase();
        let mut counts: HashMap<String, usize> = HashMap::new();
        for m in word_pattern().find_iter(&text) {
            let word = m.as_str();
            if STOPWORDS.contains(&word) {
                continue;
            }
            *counts.entry(word.to_string()).or_insert(0) += 1;
        }

        let mut freqs: Vec<(String, usize)> = counts.into_iter().collect();
        freqs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        freqs
    }
}
