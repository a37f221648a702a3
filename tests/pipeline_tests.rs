//! End-to-end pipeline tests against a mock upstream.
//!
//! One mockito server plays all three services; the endpoint bases in the
//! configuration are pointed at it, so a full `run` exercises the real
//! request building, parsing, degradation, and export paths.

use insight_scout::config::Config;
use insight_scout::export;
use insight_scout::pipeline::{PAPERS_NOTICE, PATENTS_NOTICE, TRENDS_NOTICE};
use insight_scout::Pipeline;

const ARXIV_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
    <feed xmlns="http://www.w3.org/2005/Atom">
        <title>arXiv Query Results</title>
        <entry>
            <id>http://arxiv.org/abs/2301.12345v1</id>
            <title>Quantum Error Correction at Scale</title>
            <summary>We study error correction across large devices.</summary>
            <published>2023-01-15T10:00:00Z</published>
            <author><name>Ada Lovelace</name></author>
            <link rel="related" type="application/pdf" href="http://arxiv.org/pdf/2301.12345v1.pdf"/>
        </entry>
        <entry>
            <id>http://arxiv.org/abs/2302.67890v2</id>
            <title>Topological Qubits in Practice</title>
            <summary>A survey of topological approaches.</summary>
            <published>2023-02-20T08:30:00Z</published>
            <author><name>Alan Turing</name></author>
        </entry>
    </feed>
"#;

const PATENTS_BODY: &str = r#"{"patents":[
    {"patent_id":"11000001","patent_title":"Quantum processor assembly","patent_date":"2024-02-13"},
    {"patent_id":"11000002","patent_title":null,"patent_date":null}
],"count":2,"total_patent_count":2}"#;

const EXPLORE_BODY: &str = ")]}'\n{\"widgets\":[\
    {\"id\":\"TIMESERIES\",\"token\":\"APP6_abc123\",\"request\":{\"time\":\"today 12-m\",\"resolution\":\"WEEK\"}},\
    {\"id\":\"RELATED_TOPICS\",\"token\":\"APP6_def456\"}]}";

const MULTILINE_BODY: &str = ")]}',\n{\"default\":{\"timelineData\":[\
    {\"time\":\"1755648000\",\"formattedTime\":\"Aug 17 - 23, 2025\",\"value\":[42]},\
    {\"time\":\"1756252800\",\"formattedTime\":\"Aug 24 - 30, 2025\",\"value\":[55]}]}}";

/// Configuration with all three endpoint bases pointed at the mock server
fn test_config(base: &str) -> Config {
    let mut config = Config::default();
    config.endpoints.arxiv_base = base.to_string();
    config.endpoints.patents_base = base.to_string();
    config.endpoints.trends_base = base.to_string();
    config.fetch.timeout_secs = 5;
    config
}

async fn mock_arxiv(server: &mut mockito::ServerGuard, status: usize, body: &str) -> mockito::Mock {
    server
        .mock("GET", "/api/query")
        .match_query(mockito::Matcher::Any)
        .with_status(status)
        .with_body(body)
        .create_async()
        .await
}

async fn mock_patents(
    server: &mut mockito::ServerGuard,
    status: usize,
    body: &str,
) -> mockito::Mock {
    server
        .mock("GET", "/patents/query")
        .match_query(mockito::Matcher::Any)
        .with_status(status)
        .with_body(body)
        .create_async()
        .await
}

async fn mock_trends(server: &mut mockito::ServerGuard) -> (mockito::Mock, mockito::Mock) {
    let explore = server
        .mock("GET", "/trends/api/explore")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(EXPLORE_BODY)
        .create_async()
        .await;
    let multiline = server
        .mock("GET", "/trends/api/widgetdata/multiline")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(MULTILINE_BODY)
        .create_async()
        .await;
    (explore, multiline)
}

#[tokio::test]
async fn test_full_cycle_all_sources_up() {
    let mut server = mockito::Server::new_async().await;
    mock_arxiv(&mut server, 200, ARXIV_FEED).await;
    mock_patents(&mut server, 200, PATENTS_BODY).await;
    mock_trends(&mut server).await;

    let pipeline = Pipeline::new(&test_config(&server.url())).unwrap();
    let report = pipeline.run("quantum computing").await;

    assert_eq!(report.paper_count(), 2);
    assert_eq!(report.patent_count(), 2);
    assert_eq!(report.total_insights(), 4);

    let trends = report.trends.fetched().unwrap();
    assert_eq!(trends.len(), 2);
    assert_eq!(trends.points[0].value, 42);

    // Missing patent fields fall back to the placeholder
    let patents = report.patents.fetched().unwrap();
    assert_eq!(patents[1].title, "N/A");
    assert_eq!(patents[1].date, "N/A");
}

#[tokio::test]
async fn test_patent_failure_degrades_only_patents() {
    let mut server = mockito::Server::new_async().await;
    mock_arxiv(&mut server, 200, ARXIV_FEED).await;
    mock_patents(&mut server, 500, "upstream exploded").await;
    mock_trends(&mut server).await;

    let pipeline = Pipeline::new(&test_config(&server.url())).unwrap();
    let report = pipeline.run("quantum computing").await;

    assert_eq!(report.patents.notice(), Some(PATENTS_NOTICE));
    assert_eq!(report.paper_count(), 2);
    // An unavailable source contributes zero, nothing else changes
    assert_eq!(report.total_insights(), 2);
    assert!(report.trends.fetched().is_some());

    // The export carries only the paper rows
    assert_eq!(export::export_rows(&report).len(), 2);
}

#[tokio::test]
async fn test_paper_failure_degrades_only_papers() {
    let mut server = mockito::Server::new_async().await;
    mock_arxiv(&mut server, 500, "").await;
    mock_patents(&mut server, 200, PATENTS_BODY).await;
    mock_trends(&mut server).await;

    let pipeline = Pipeline::new(&test_config(&server.url())).unwrap();
    let report = pipeline.run("quantum computing").await;

    assert_eq!(report.papers.notice(), Some(PAPERS_NOTICE));
    assert_eq!(report.paper_count(), 0);
    assert_eq!(report.patent_count(), 2);
    assert_eq!(report.total_insights(), 2);
    assert!(report.trends.fetched().is_some());

    // The word cloud draws from the surviving patent titles only
    let freqs = report.word_frequencies();
    assert!(freqs.iter().any(|(w, _)| w == "quantum"));
}

#[tokio::test]
async fn test_trend_failure_never_affects_totals() {
    let mut server = mockito::Server::new_async().await;
    mock_arxiv(&mut server, 200, ARXIV_FEED).await;
    mock_patents(&mut server, 200, PATENTS_BODY).await;
    server
        .mock("GET", "/trends/api/explore")
        .match_query(mockito::Matcher::Any)
        .with_status(429)
        .create_async()
        .await;

    let pipeline = Pipeline::new(&test_config(&server.url())).unwrap();
    let report = pipeline.run("quantum computing").await;

    assert_eq!(report.trends.notice(), Some(TRENDS_NOTICE));
    assert_eq!(report.total_insights(), 4);
}

#[tokio::test]
async fn test_all_sources_down() {
    let mut server = mockito::Server::new_async().await;
    mock_arxiv(&mut server, 503, "").await;
    mock_patents(&mut server, 503, "").await;
    server
        .mock("GET", "/trends/api/explore")
        .match_query(mockito::Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let pipeline = Pipeline::new(&test_config(&server.url())).unwrap();
    let report = pipeline.run("quantum computing").await;

    assert_eq!(report.total_insights(), 0);
    assert!(report.papers.is_unavailable());
    assert!(report.patents.is_unavailable());
    assert!(report.trends.is_unavailable());
    assert!(report.word_frequencies().is_empty());

    // The export still produces a well-formed header-only file
    let dir = tempfile::tempdir().unwrap();
    let path = export::write_csv(&report, dir.path()).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.trim_end(), "Title,Authors,Date,Summary,PDF,ID");
}

#[tokio::test]
async fn test_malformed_patent_body_degrades() {
    let mut server = mockito::Server::new_async().await;
    mock_arxiv(&mut server, 200, ARXIV_FEED).await;
    mock_patents(&mut server, 200, "<html>not json</html>").await;
    mock_trends(&mut server).await;

    let pipeline = Pipeline::new(&test_config(&server.url())).unwrap();
    let report = pipeline.run("quantum computing").await;

    assert_eq!(report.patents.notice(), Some(PATENTS_NOTICE));
    assert_eq!(report.total_insights(), 2);
}

#[tokio::test]
async fn test_quoted_query_completes() {
    let mut server = mockito::Server::new_async().await;
    mock_arxiv(&mut server, 200, ARXIV_FEED).await;
    mock_patents(&mut server, 200, PATENTS_BODY).await;
    mock_trends(&mut server).await;

    let pipeline = Pipeline::new(&test_config(&server.url())).unwrap();
    let report = pipeline.run(r#"say "cheese" & run"#).await;

    // Quotes and ampersands survive request building and land in the report
    assert_eq!(report.query, r#"say "cheese" & run"#);
    assert_eq!(report.total_insights(), 4);
}

#[tokio::test]
async fn test_csv_export_from_full_cycle() {
    let mut server = mockito::Server::new_async().await;
    mock_arxiv(&mut server, 200, ARXIV_FEED).await;
    mock_patents(&mut server, 200, PATENTS_BODY).await;
    mock_trends(&mut server).await;

    let pipeline = Pipeline::new(&test_config(&server.url())).unwrap();
    let report = pipeline.run("quantum computing").await;

    let dir = tempfile::tempdir().unwrap();
    let path = export::write_csv(&report, dir.path()).unwrap();

    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "quantum computing_insights.csv"
    );
    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1 + report.total_insights());
    assert_eq!(lines[0], "Title,Authors,Date,Summary,PDF,ID");
    assert!(lines[1].contains("Quantum Error Correction at Scale"));
    // Patent rows carry the ID in the last column
    assert!(lines[3].ends_with(",11000001") || lines[3].contains("11000001"));
}
