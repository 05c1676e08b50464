//! CSV export of report rows.
//!
//! The whole document is rendered in memory first, then written to disk in
//! one shot, so the destination is truncated and closed on every path and
//! a re-run always replaces the previous report.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::ReportRow;

/// Column labels, in output order.
pub const HEADER: [&str; 8] = [
    "Address", "ZPID", "Date 1", "Price 1", "Date 2", "Price 2", "Date 3", "Price 3",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Render the header plus one record per row.
///
/// Rendering is pure: the same rows always produce the same bytes.
pub fn render_csv(rows: &[ReportRow]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(HEADER)?;
    for row in rows {
        wtr.write_record(&row.csv_record())?;
    }
    let data = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8(data)?)
}

/// Write the report to `path`, replacing any previous file.
pub fn write_csv(path: &Path, rows: &[ReportRow]) -> Result<(), ExportError> {
    let rendered = render_csv(rows)?;
    fs::write(path, rendered).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
