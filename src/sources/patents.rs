//! PatentsView patent source adapter.

use serde::Deserialize;
use serde_json::json;

use crate::models::{PatentRecord, MISSING_FIELD};
use crate::sources::SourceError;
use crate::utils::HttpClient;

/// Query path on the PatentsView API host
const PATENTS_QUERY_PATH: &str = "/patents/query";

/// PatentsView patent source
///
/// Issues a text-match query against patent titles. The `q`/`f`/`o` parameters
/// are built with `serde_json` and URL-encoded, so quote or brace characters
/// in the user query are data, never filter syntax.
#[derive(Debug, Clone)]
pub struct PatentsViewSource {
    client: HttpClient,
    base_url: String,
    result_cap: usize,
}

/// PatentsView response envelope
#[derive(Debug, Deserialize)]
struct PatentsResponse {
    // The API returns `"patents": null` for zero matches
    #[serde(default)]
    patents: Option<Vec<PatentEntry>>,
}

#[derive(Debug, Deserialize)]
struct PatentEntry {
    patent_id: String,
    patent_title: Option<String>,
    patent_date: Option<String>,
}

impl PatentsViewSource {
    /// Create a new PatentsView source against the given API base URL
    pub fn new(client: HttpClient, base_url: impl Into<String>, result_cap: usize) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            result_cap,
        }
    }

    /// Build the search request URL
    fn request_url(&self, query: &str) -> String {
        let q = json!({ "_text_any": { "patent_title": query } });
        let f = json!(["patent_id", "patent_title", "patent_date"]);
        let o = json!({ "page": 0, "size": self.result_cap });

        format!(
            "{}{}?q={}&f={}&o={}",
            self.base_url,
            PATENTS_QUERY_PATH,
            urlencoding::encode(&q.to_string()),
            urlencoding::encode(&f.to_string()),
            urlencoding::encode(&o.to_string())
        )
    }

    /// Search for patents whose titles match the query
    pub async fn search(&self, query: &str) -> Result<Vec<PatentRecord>, SourceError> {
        let url = self.request_url(query);
        tracing::debug!(url = %url, "querying PatentsView");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to fetch patents: {}", e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "PatentsView API returned status: {}",
                response.status()
            )));
        }

        let data: PatentsResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse JSON: {}", e)))?;

        Ok(data
            .patents
            .unwrap_or_default()
            .into_iter()
            .take(self.result_cap)
            .map(|p| PatentRecord {
                id: p.patent_id,
                title: p.patent_title.unwrap_or_else(|| MISSING_FIELD.to_string()),
                date: p.patent_date.unwrap_or_else(|| MISSING_FIELD.to_string()),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn source() -> PatentsViewSource {
        PatentsViewSource::new(
            HttpClient::new(Duration::from_secs(5)).unwrap(),
            "https://api.patentsview.org",
            10,
        )
    }

    #[test]
    fn test_request_url_shape() {
        let url = source().request_url("quantum computing");
        assert!(url.starts_with("https://api.patentsview.org/patents/query?q="));
        assert!(url.contains("&f="));
        assert!(url.contains("&o="));
    }

    #[test]
    fn test_quoted_query_stays_valid_json() {
        let url = source().request_url(r#"a "quoted" {query}"#);
        // Decode the q parameter back out and re-parse it
        let q_enc = url
            .split("q=")
            .nth(1)
            .unwrap()
            .split("&f=")
            .next()
            .unwrap();
        let q_raw = urlencoding::decode(q_enc).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&q_raw).unwrap();
        assert_eq!(
            parsed["_text_any"]["patent_title"],
            r#"a "quoted" {query}"#
        );
    }

    #[tokio::test]
    async fn test_search_defaults_missing_fields() {
        let body = r#"{
            "patents": [
                {"patent_id": "11000001", "patent_title": "Quantum annealing device", "patent_date": "2023-04-11"},
                {"patent_id": "11000002"}
            ],
            "count": 2,
            "total_patent_count": 2
        }"#;

        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/patents/query")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let source = PatentsViewSource::new(
            HttpClient::new(Duration::from_secs(5)).unwrap(),
            server.url(),
            10,
        );
        let patents = source.search("quantum computing").await.unwrap();

        assert_eq!(patents.len(), 2);
        assert_eq!(patents[0].id, "11000001");
        assert_eq!(patents[0].title, "Quantum annealing device");
        assert_eq!(patents[1].title, "N/A");
        assert_eq!(patents[1].date, "N/A");
    }

    #[tokio::test]
    async fn test_search_null_patents_is_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/patents/query")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"patents": null, "count": 0}"#)
            .create_async()
            .await;

        let source = PatentsViewSource::new(
            HttpClient::new(Duration::from_secs(5)).unwrap(),
            server.url(),
            10,
        );
        let patents = source.search("no such topic").await.unwrap();
        assert!(patents.is_empty());
    }

    #[tokio::test]
    async fn test_search_malformed_body_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/patents/query")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let source = PatentsViewSource::new(
            HttpClient::new(Duration::from_secs(5)).unwrap(),
            server.url(),
            10,
        );
        let err = source.search("anything").await.unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }
}
