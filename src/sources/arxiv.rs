//! arXiv paper source adapter.

use feed_rs::parser;

use crate::models::PaperRecord;
use crate::sources::SourceError;
use crate::utils::{summary_excerpt, HttpClient};

/// Query path on the arXiv API host
const ARXIV_QUERY_PATH: &str = "/api/query";

/// Abstract excerpt length in characters
const SUMMARY_EXCERPT_CHARS: usize = 200;

/// arXiv paper source
///
/// Searches the arXiv Atom API by keyword and maps entries to [`PaperRecord`]s
/// in upstream (relevance) order.
#[derive(Debug, Clone)]
pub struct ArxivSource {
    client: HttpClient,
    base_url: String,
    result_cap: usize,
}

impl ArxivSource {
    /// Create a new arXiv source against the given API base URL
    pub fn new(client: HttpClient, base_url: impl Into<String>, result_cap: usize) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            result_cap,
        }
    }

    /// Build the search request URL
    fn request_url(&self, query: &str) -> String {
        let search_query = format!("all:{}", query);
        format!(
            "{}{}?search_query={}&start=0&max_results={}",
            self.base_url,
            ARXIV_QUERY_PATH,
            urlencoding::encode(&search_query),
            self.result_cap
        )
    }

    /// Map an Atom entry to a paper record
    fn parse_entry(entry: &feed_rs::model::Entry) -> PaperRecord {
        let title = entry
            .title
            .as_ref()
            .map(|t| t.content.clone())
            .unwrap_or_default();

        let authors: Vec<String> = entry.authors.iter().map(|a| a.name.clone()).collect();

        let published = entry.published.map(|d| d.to_rfc3339()).unwrap_or_default();

        // Abstracts arrive with hard line wraps; collapse them before excerpting
        let abstract_text = entry
            .summary
            .as_ref()
            .map(|s| s.content.split_whitespace().collect::<Vec<_>>().join(" "))
            .unwrap_or_default();
        let summary = summary_excerpt(&abstract_text, SUMMARY_EXCERPT_CHARS);

        // The PDF link is the rel="related" application/pdf entry; fall back
        // to rewriting the abs URL
        let pdf_url = entry
            .links
            .iter()
            .find(|l| l.media_type.as_deref() == Some("application/pdf"))
            .map(|l| l.href.clone())
            .unwrap_or_else(|| entry.id.replace("/abs/", "/pdf/"));

        PaperRecord {
            title,
            authors,
            published,
            summary,
            pdf_url,
        }
    }

    /// Search for papers matching the query
    pub async fn search(&self, query: &str) -> Result<Vec<PaperRecord>, SourceError> {
        let url = self.request_url(query);
        tracing::debug!(url = %url, "querying arXiv");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/atom+xml")
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to fetch arXiv results: {}", e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "arXiv API returned status: {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to read response: {}", e)))?;

        let feed = parser::parse(bytes.as_ref())
            .map_err(|e| SourceError::Parse(format!("Failed to parse Atom feed: {}", e)))?;

        Ok(feed
            .entries
            .iter()
            .take(self.result_cap)
            .map(Self::parse_entry)
            .collect())
    }
}
