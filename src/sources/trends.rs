//! Google Trends source adapter.
//!
//! Two-step protocol: `explore` hands back per-widget tokens, then
//! `widgetdata/multiline` serves the actual interest-over-time series for the
//! TIMESERIES widget. Both endpoints prefix their JSON with an anti-XSSI
//! garbage line that has to be stripped before parsing.

use serde::Deserialize;
use serde_json::json;

use crate::models::{TrendPoint, TrendSeries};
use crate::sources::SourceError;
use crate::utils::HttpClient;

const EXPLORE_PATH: &str = "/trends/api/explore";
const MULTILINE_PATH: &str = "/trends/api/widgetdata/multiline";

/// Interface language
const HL: &str = "en-US";
/// Timezone offset in minutes
const TZ: i32 = 360;
/// Category filter (0 = all categories)
const CATEGORY: u32 = 0;
/// Last 12 months
const TIMEFRAME: &str = "today 12-m";

/// Google Trends source
///
/// Fetches a 12-month relative-interest series for a keyword, worldwide,
/// all categories.
#[derive(Debug, Clone)]
pub struct TrendsSource {
    client: HttpClient,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ExploreResponse {
    widgets: Vec<Widget>,
}

#[derive(Debug, Deserialize)]
struct Widget {
    id: String,
    token: Option<String>,
    request: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct MultilineResponse {
    default: Timeline,
}

#[derive(Debug, Deserialize)]
struct Timeline {
    #[serde(rename = "timelineData", default)]
    timeline_data: Vec<TimelineEntry>,
}

#[derive(Debug, Deserialize)]
struct TimelineEntry {
    /// Epoch seconds, as a string
    time: String,
    #[serde(default)]
    value: Vec<u32>,
}

impl TrendsSource {
    /// Create a new trends source against the given base URL
    pub fn new(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Build the explore request URL for a keyword
    fn explore_url(&self, query: &str) -> String {
        let req = json!({
            "comparisonItem": [{ "keyword": query, "geo": "", "time": TIMEFRAME }],
            "category": CATEGORY,
            "property": "",
        });
        format!(
            "{}{}?hl={}&tz={}&req={}",
            self.base_url,
            EXPLORE_PATH,
            HL,
            TZ,
            urlencoding::encode(&req.to_string())
        )
    }

    /// Build the widget-data URL from the TIMESERIES widget
    fn multiline_url(&self, request: &serde_json::Value, token: &str) -> String {
        format!(
            "{}{}?hl={}&tz={}&req={}&token={}",
            self.base_url,
            MULTILINE_PATH,
            HL,
            TZ,
            urlencoding::encode(&request.to_string()),
            urlencoding::encode(token)
        )
    }

    /// Strip the anti-XSSI prefix (`)]}'` plus punctuation, 4 or 5 bytes
    /// depending on the endpoint) down to the first JSON brace.
    fn strip_antixssi(body: &str) -> &str {
        match body.find('{') {
            Some(pos) => &body[pos..],
            None => "",
        }
    }

    async fn fetch_json_text(&self, url: &str) -> Result<String, SourceError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to fetch trends: {}", e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "Trends API returned status: {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to read response: {}", e)))
    }

    /// Fetch the 12-month interest-over-time series for a keyword
    pub async fn interest_over_time(&self, query: &str) -> Result<TrendSeries, SourceError> {
        let explore_url = self.explore_url(query);
        tracing::debug!(url = %explore_url, "querying trends explore");

        let body = self.fetch_json_text(&explore_url).await?;
        let explore: ExploreResponse = serde_json::from_str(Self::strip_antixssi(&body))?;

        let widget = explore
            .widgets
            .into_iter()
            .find(|w| w.id == "TIMESERIES")
            .ok_or_else(|| SourceError::Parse("No TIMESERIES widget in response".to_string()))?;

        let (token, request) = match (widget.token, widget.request) {
            (Some(token), Some(request)) => (token, request),
            _ => {
                return Err(SourceError::Parse(
                    "TIMESERIES widget missing token or request".to_string(),
                ))
            }
        };

        let data_url = self.multiline_url(&request, &token);
        tracing::debug!(url = %data_url, "querying trends widget data");

        let body = self.fetch_json_text(&data_url).await?;
        let multiline: MultilineResponse = serde_json::from_str(Self::strip_antixssi(&body))?;

        let points = multiline
            .default
            .timeline_data
            .into_iter()
            .filter_map(|entry| {
                let secs: i64 = entry.time.parse().ok()?;
                let date = chrono::DateTime::from_timestamp(secs, 0)?.date_naive();
                Some(TrendPoint {
                    date,
                    value: entry.value.first().copied().unwrap_or(0),
                })
            })
            .collect();

        Ok(TrendSeries {
            keyword: query.to_string(),
            points,
        })
    }
}
