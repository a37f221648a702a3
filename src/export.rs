//! CSV export of the merged paper + patent table.
//!
//! The export table is the union of the two record schemas: paper rows first,
//! then patent rows, with cells left empty where a record type has no value
//! for a column. Produced solely for download; nothing is read back.

use std::path::{Path, PathBuf};

use crate::models::InsightReport;

/// Column union of [`PaperRecord`](crate::models::PaperRecord) and
/// [`PatentRecord`](crate::models::PatentRecord) fields.
pub const EXPORT_COLUMNS: [&str; 6] = ["Title", "Authors", "Date", "Summary", "PDF", "ID"];

/// Build the export rows: papers then patents, union schema, blank cells for
/// fields a record type lacks. Empty when both sources produced nothing.
pub fn export_rows(report: &InsightReport) -> Vec<[String; 6]> {
    let mut rows = Vec::with_capacity(report.total_insights());

    if let Some(papers) = report.papers.fetched() {
        for paper in papers {
            rows.push([
                paper.title.clone(),
                paper.display_authors(),
                paper.published.clone(),
                paper.summary.clone(),
                paper.pdf_url.clone(),
                String::new(),
            ]);
        }
    }

    if let Some(patents) = report.patents.fetched() {
        for patent in patents {
            rows.push([
                patent.title.clone(),
                String::new(),
                patent.date.clone(),
                String::new(),
                String::new(),
                patent.id.clone(),
            ]);
        }
    }

    rows
}

/// Export artifact filename for a query: `<query>_insights.csv`, with only
/// the characters the filesystem cannot take replaced.
pub fn export_filename(query: &str) -> String {
    let safe: String = query
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            other => other,
        })
        .collect();
    format!("{}_insights.csv", safe)
}

/// Serialize the export table to CSV (UTF-8, header row first).
pub fn csv_bytes(report: &InsightReport) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_COLUMNS)?;
    for row in export_rows(report) {
        writer.write_record(&row)?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(std::io::Error::other(e.to_string())))
}

/// Write the export CSV into `dir`, returning the path written.
pub fn write_csv(report: &InsightReport, dir: &Path) -> Result<PathBuf, csv::Error> {
    let path = dir.join(export_filename(&report.query));
    let bytes = csv_bytes(report)?;
    std::fs::write(&path, bytes)?;
    Ok(path)
}
