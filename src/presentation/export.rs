//! CSV export of the full collection.
//!
//! Layout: an unquoted header `#,Summary,Given,When,Then`, then one row per
//! scenario. Rows are written with [`QuoteStyle::NonNumeric`], so the ordinal
//! stays bare and text fields are wrapped in double quotes with embedded
//! quotes doubled. Rows end in `\n`.

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use super::types::{PresentationError, PresentationResult};
use crate::testcase::TestCase;

pub const CSV_HEADER: &str = "#,Summary,Given,When,Then";

/// Serialize `cases` in collection order
pub fn export_csv(cases: &[TestCase]) -> PresentationResult<String> {
    let mut buf = Vec::with_capacity(CSV_HEADER.len() + 1 + cases.len() * 160);
    writeln!(buf, "{}", CSV_HEADER)?;

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buf);
    for (i, tc) in cases.iter().enumerate() {
        let ordinal = (i + 1).to_string();
        writer.write_record([
            ordinal.as_str(),
            tc.summary.as_str(),
            tc.given.as_str(),
            tc.when.as_str(),
            tc.then.as_str(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

/// `test-cases-<YYYY-MM-DD>.csv`
pub fn export_filename(date: NaiveDate) -> String {
    format!("test-cases-{}.csv", date.format("%Y-%m-%d"))
}

/// Write the export for `date` into `dir` and return the file path.
///
/// An existing file for the same date is overwritten.
pub fn write_export(dir: &Path, cases: &[TestCase], date: NaiveDate) -> PresentationResult<PathBuf> {
    if cases.is_empty() {
        return Err(PresentationError::NothingToExport);
    }
    fs::create_dir_all(dir)?;
    let path = dir.join(export_filename(date));
    fs::write(&path, export_csv(cases)?)?;
    info!(path = %path.display(), rows = cases.len(), "test cases exported");
    Ok(path)
}

/// Today's UTC date, used to name exports
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}
