//! CSV output.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{ExportError, ExportResult};
use crate::models::FilteredPaperRecord;

/// What [`write_csv`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvOutcome {
    /// File created with a header and `rows` data rows.
    Written {
        /// File written.
        path: PathBuf,
        /// Data rows, excluding the header.
        rows: usize,
    },

    /// Nothing to write; no file was created.
    NoData,
}

/// Write `records` to a UTF-8 CSV file at `path`.
///
/// An empty slice creates no file. A failure part-way through may leave a
/// partially written file behind.
pub fn write_csv(records: &[FilteredPaperRecord], path: &Path) -> ExportResult<CsvOutcome> {
    if records.is_empty() {
        return Ok(CsvOutcome::NoData);
    }

    let io_error = |source| ExportError::Io { path: path.to_path_buf(), source };

    let file = File::create(path).map_err(io_error)?;
    write_csv_to(records, file).map_err(|source| ExportError::Csv { path: path.to_path_buf(), source })?;

    tracing::debug!(path = %path.display(), rows = records.len(), "CSV written");
    Ok(CsvOutcome::Written { path: path.to_path_buf(), rows: records.len() })
}

/// Write a header row and one row per record to `writer`.
pub fn write_csv_to<W: Write>(records: &[FilteredPaperRecord], writer: W) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(true).from_writer(writer);

    for record in records {
        wtr.serialize(record)?;
    }

    wtr.flush()?;
    Ok(())
}
