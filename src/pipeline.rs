//! The fetch-aggregate pipeline.
//!
//! One call to [`Pipeline::run`] is one complete cycle: fan out to the three
//! sources, convert each arm's result to a [`FetchOutcome`], and hand the
//! report to the presenter. The three fetches are independent and read-only,
//! so they run concurrently; one source failing never blocks or fails the
//! others.

use std::time::Duration;

use crate::config::Config;
use crate::models::{FetchOutcome, InsightReport, PaperRecord, PatentRecord, TrendSeries};
use crate::sources::{ArxivSource, PatentsViewSource, SourceError, TrendsSource};
use crate::utils::HttpClient;

/// Fallback notice when the paper source fails
pub const PAPERS_NOTICE: &str = "No papers found. Try another query!";
/// Fallback notice when the patent source fails
pub const PATENTS_NOTICE: &str = "No patents found.";
/// Fallback notice when the trend source fails
pub const TRENDS_NOTICE: &str = "Trends unavailable.";

/// The three source adapters wired to one shared HTTP client.
#[derive(Debug, Clone)]
pub struct Pipeline {
    arxiv: ArxivSource,
    patents: PatentsViewSource,
    trends: TrendsSource,
}

impl Pipeline {
    /// Build a pipeline from configuration
    pub fn new(config: &Config) -> Result<Self, SourceError> {
        let client = HttpClient::new(Duration::from_secs(config.fetch.timeout_secs))
            .map_err(|e| SourceError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            arxiv: ArxivSource::new(
                client.clone(),
                config.endpoints.arxiv_base.clone(),
                config.fetch.result_cap,
            ),
            patents: PatentsViewSource::new(
                client.clone(),
                config.endpoints.patents_base.clone(),
                config.fetch.result_cap,
            ),
            trends: TrendsSource::new(client, config.endpoints.trends_base.clone()),
        })
    }

    /// Fetch papers, degrading any failure to an empty outcome
    pub async fn papers(&self, query: &str) -> FetchOutcome<Vec<PaperRecord>> {
        degrade("arxiv", self.arxiv.search(query).await, PAPERS_NOTICE)
    }

    /// Fetch patents, degrading any failure to an empty outcome
    pub async fn patents(&self, query: &str) -> FetchOutcome<Vec<PatentRecord>> {
        degrade("patentsview", self.patents.search(query).await, PATENTS_NOTICE)
    }

    /// Fetch the trend series, degrading any failure to an empty outcome
    pub async fn trends(&self, query: &str) -> FetchOutcome<TrendSeries> {
        degrade(
            "trends",
            self.trends.interest_over_time(query).await,
            TRENDS_NOTICE,
        )
    }

    /// Run one full fetch cycle for a query
    pub async fn run(&self, query: &str) -> InsightReport {
        let (papers, patents, trends) = tokio::join!(
            self.papers(query),
            self.patents(query),
            self.trends(query)
        );

        InsightReport {
            query: query.to_string(),
            papers,
            patents,
            trends,
        }
    }
}

/// Map an adapter result to an outcome, logging the degradation
fn degrade<T>(source: &str, result: Result<T, SourceError>, notice: &str) -> FetchOutcome<T> {
    if let Err(ref e) = result {
        tracing::warn!(source, error = %e, "source degraded to empty result");
    }
    FetchOutcome::from_result(result, notice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degrade_preserves_ok() {
        let outcome = degrade("test", Ok(vec![1, 2, 3]), "notice");
        assert_eq!(outcome.fetched(), Some(&vec![1, 2, 3]));
    }

    #[test]
    fn test_degrade_converts_err_to_notice() {
        let outcome: FetchOutcome<Vec<u8>> = degrade(
            "test",
            Err(SourceError::Network("down".to_string())),
            PATENTS_NOTICE,
        );
        assert_eq!(outcome.notice(), Some(PATENTS_NOTICE));
    }

    #[test]
    fn test_pipeline_from_default_config() {
        let pipeline = Pipeline::new(&Config::default());
        assert!(pipeline.is_ok());
    }
}
