//! Terminal presentation of an [`InsightReport`].
//!
//! The presenter never observes failure directly, only absence of data: an
//! `Unavailable` section renders its fallback notice, an empty fetched
//! section renders a dimmed zero-results line, and the word-cloud and trend
//! chart are skipped entirely when they have nothing to show.

use comfy_table::{presets, Attribute, Cell, Table};
use owo_colors::OwoColorize;

use crate::models::{InsightReport, PaperRecord, PatentRecord, TrendSeries};
use crate::ui::{notice, print_section};
use crate::utils::{bar, sparkline, truncate_with_ellipsis};

/// How many words of the frequency list the word-cloud shows.
const WORD_CLOUD_LIMIT: usize = 20;

/// Width of the word-cloud bars in cells.
const WORD_CLOUD_BAR_WIDTH: usize = 30;

/// Render the full report in table mode.
pub fn render_report(report: &InsightReport) {
    print_section("📚 Academic Papers (arXiv)");
    match report.papers.fetched() {
        Some(papers) if !papers.is_empty() => println!("{}", paper_table(papers)),
        Some(_) => println!("{}", "0 results.".dimmed()),
        None => notice(report.papers.notice().unwrap_or_default()),
    }

    print_section("🔬 Patents");
    match report.patents.fetched() {
        Some(patents) if !patents.is_empty() => println!("{}", patent_table(patents)),
        Some(_) => println!("{}", "0 results.".dimmed()),
        None => notice(report.patents.notice().unwrap_or_default()),
    }

    print_section("📈 Market Trends");
    match report.trends.fetched() {
        Some(series) if !series.is_empty() => println!("{}", trend_chart(series)),
        Some(_) => println!("{}", "No trend data.".dimmed()),
        None => notice(report.trends.notice().unwrap_or_default()),
    }

    print_section("🔍 Quick Analysis");
    println!(
        "Total Insights Found: {}",
        report.total_insights().to_string().bold()
    );

    let freqs = report.word_frequencies();
    if !freqs.is_empty() {
        println!();
        println!("{}", word_cloud(&freqs));
    }
}

/// Serialize the full report as pretty JSON.
pub fn render_json(report: &InsightReport) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Build the papers table.
pub fn paper_table(papers: &[PaperRecord]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.set_header(vec!["Title", "Authors", "Date", "Summary", "PDF"]);

    for paper in papers {
        let year_date = paper.published.chars().take(10).collect::<String>();
        table.add_row(vec![
            Cell::new(truncate_with_ellipsis(&paper.title, 50)).add_attribute(Attribute::Bold),
            Cell::new(truncate_with_ellipsis(&paper.display_authors(), 30)),
            Cell::new(year_date),
            Cell::new(truncate_with_ellipsis(&paper.summary, 60)),
            Cell::new(paper.pdf_url.clone()),
        ]);
    }
    table
}

/// Build the patents table.
pub fn patent_table(patents: &[PatentRecord]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.set_header(vec!["ID", "Title", "Date"]);

    for patent in patents {
        table.add_row(vec![
            Cell::new(patent.id.clone()),
            Cell::new(truncate_with_ellipsis(&patent.title, 60)).add_attribute(Attribute::Bold),
            Cell::new(patent.date.clone()),
        ]);
    }
    table
}

/// Render the trend series as a labelled sparkline chart.
pub fn trend_chart(series: &TrendSeries) -> String {
    let mut out = String::new();
    out.push_str(&format!("Interest in '{}' over time\n", series.keyword));
    out.push_str(&sparkline(&series.values()));
    out.push('\n');

    if let (Some(first), Some(last)) = (series.points.first(), series.points.last()) {
        out.push_str(&format!("{} — {}", first.date, last.date));
    }
    if let Some(peak) = series.peak() {
        out.push_str(&format!("   peak: {} on {}", peak.value, peak.date));
    }
    out
}

/// Render the title word frequencies as a scaled bar list.
pub fn word_cloud(freqs: &[(String, usize)]) -> String {
    let top = &freqs[..freqs.len().min(WORD_CLOUD_LIMIT)];
    let max = top.first().map(|(_, c)| *c).unwrap_or(0);
    let label_width = top.iter().map(|(w, _)| w.len()).max().unwrap_or(0);

    top.iter()
        .map(|(word, count)| {
            format!(
                "{:>width$}  {} {}",
                word,
                bar(*count, max, WORD_CLOUD_BAR_WIDTH),
                count,
                width = label_width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
