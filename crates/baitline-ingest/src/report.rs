//! CSV report writer.
//!
//! The report has a fixed ten-column header (see
//! [`REPORT_COLUMNS`](baitline_core::REPORT_COLUMNS)) followed by one row per
//! recipient in reconciler order. Booleans render as `Yes`/`No`. Fields are
//! quoted only when needed and records end in CRLF.
//!
//! The header is always written, so a run with no recipients still yields a
//! valid header-only file.
//!
//! **The `Captured Password (sample)` column holds clear-text passwords.**
//! Handle the report with the same care as the credential log it came from.

use crate::{Error, Result};
use baitline_core::{REPORT_COLUMNS, ReportRow};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes reconciled rows to a CSV file, replacing any previous report.
pub struct ReportWriter {
    path: PathBuf,
}

impl ReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `rows` to the report file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Output`] if the file cannot be created or written.
    /// The parent directory is not created.
    pub fn write(&self, rows: &[ReportRow]) -> Result<()> {
        let file = File::create(&self.path).map_err(|e| Error::output(&self.path, e))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(file);

        writer
            .write_record(REPORT_COLUMNS)
            .map_err(|e| Error::output(&self.path, e))?;
        for row in rows {
            writer
                .serialize(row)
                .map_err(|e| Error::output(&self.path, e))?;
        }
        writer.flush().map_err(|e| Error::output(&self.path, e))?;

        info!("CSV report written to {} ({} rows)", self.path.display(), rows.len());
        Ok(())
    }
}
