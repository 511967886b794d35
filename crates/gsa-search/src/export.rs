//! CSV export of a result list.
//!
//! The header row is written as plain text. Every data cell is quoted, with
//! embedded quotes doubled, whether or not the value needs it. Rows are
//! separated by a bare `\n`.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use gsa_model::Opportunity;
use thiserror::Error;
use tracing::debug;

use crate::filter::dates::format_display_date;

/// Column headers, in output order.
pub const EXPORT_HEADERS: [&str; 11] = [
    "Title",
    "Agency",
    "NAICS",
    "Set-Aside",
    "Vehicle",
    "Due Date",
    "Status",
    "% Complete",
    "Fit Score",
    "Ceiling Min",
    "Ceiling Max",
];

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to create or write the output.
    #[error("failed to write export: {0}")]
    Io(#[from] io::Error),

    /// CSV encoding error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

fn record(opp: &Opportunity) -> [String; 11] {
    let bounds = opp.ceiling.map(|c| c.bounds());
    [
        opp.title.clone(),
        opp.agency.clone(),
        opp.naics.clone(),
        opp.set_aside.join("; "),
        opp.vehicle.clone(),
        format_display_date(opp.due_date),
        opp.status.to_string(),
        opp.percent_complete.to_string(),
        opp.fit_score.to_string(),
        bounds.map(|b| b.min.to_string()).unwrap_or_default(),
        bounds.map(|b| b.max.to_string()).unwrap_or_default(),
    ]
}

/// Writes the header and one row per opportunity, in the order given.
///
/// No trailing newline follows the last row.
pub fn write_csv<W: Write>(mut out: W, items: &[&Opportunity]) -> Result<()> {
    out.write_all(EXPORT_HEADERS.join(",").as_bytes())?;

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for opp in items {
        writer.write_record(record(opp))?;
    }
    let body = writer
        .into_inner()
        .map_err(|e| ExportError::Io(io::Error::new(e.error().kind(), e.to_string())))?;

    if let Some(rows) = body.strip_suffix(b"\n") {
        out.write_all(b"\n")?;
        out.write_all(rows)?;
    }
    out.flush()?;
    Ok(())
}

/// Renders the export as a string.
pub fn to_csv_string(items: &[&Opportunity]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, items)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// File name for an export made on `date`: `gsa-applications-YYYY-MM-DD.csv`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("gsa-applications-{}.csv", date.format("%Y-%m-%d"))
}

/// Writes the export to `dir` under [`export_filename`] and returns the path.
pub fn export_to_dir(dir: &Path, date: NaiveDate, items: &[&Opportunity]) -> Result<PathBuf> {
    let path = dir.join(export_filename(date));
    let file = File::create(&path)?;
    write_csv(io::BufWriter::new(file), items)?;
    debug!(path = %path.display(), rows = items.len(), "exported results");
    Ok(path)
}
