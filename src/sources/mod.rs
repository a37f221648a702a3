//! Source adapters for the three external services.
//!
//! Each adapter translates between this crate's data model and one external
//! service's API shape:
//!
//! - [`ArxivSource`]: academic papers from the arXiv Atom API
//! - [`PatentsViewSource`]: granted patents from the PatentsView REST API
//! - [`TrendsSource`]: 12-month interest-over-time from Google Trends
//!
//! Adapters return a plain `Result`; the pipeline owns the best-effort
//! degradation contract (any error becomes an empty section plus a fallback
//! notice, never crossing adapter boundaries).

mod arxiv;
mod patents;
mod trends;

pub use arxiv::ArxivSource;
pub use patents::PatentsViewSource;
pub use trends::TrendsSource;

/// Errors that can occur when interacting with a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing error (Atom, JSON, etc.)
    #[error("Parse error: {0}")]
    Parse(String),

    /// API error from the source
    #[error("API error: {0}")]
    Api(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_maps_to_parse() {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let source_err: SourceError = err.into();
        assert!(matches!(source_err, SourceError::Parse(_)));
        assert!(source_err.to_string().starts_with("Parse error: JSON:"));
    }
}
