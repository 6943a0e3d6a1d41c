//! End-to-end report run.
//!
//! ```text
//! [structured log] ─┐
//! [pixel log]      ─┼─→ [reconcile] → [ReportWriter] → report.csv
//! [credential log] ─┘
//! ```
//!
//! The three sources are parsed one after another and never see each
//! other's state. Only the final write can fail the run.

use crate::config::PathsConfig;
use crate::report::ReportWriter;
use crate::source::{CredentialSource, LogSource, PixelSource, SourceStats, StructuredSource};
use crate::Result;
use baitline_core::{FunnelSummary, ReportRow, reconcile};
use std::path::PathBuf;
use tracing::info;

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub structured: SourceStats,
    pub pixel: SourceStats,
    pub credential: SourceStats,
    pub funnel: FunnelSummary,
    pub output: PathBuf,
}

/// The full parse → reconcile → write pipeline.
pub struct Pipeline {
    structured: StructuredSource,
    pixel: PixelSource,
    credential: CredentialSource,
    writer: ReportWriter,
}

impl Pipeline {
    pub fn new(config: PathsConfig) -> Result<Self> {
        Ok(Self {
            structured: StructuredSource::new(config.structured_log),
            pixel: PixelSource::new(config.pixel_log)?,
            credential: CredentialSource::new(config.credential_log)?,
            writer: ReportWriter::new(config.output),
        })
    }

    /// Parse all sources and reconcile them, without writing anything.
    pub fn build_rows(&self) -> (Vec<ReportRow>, [SourceStats; 3]) {
        info!("Parsing {} log: {}", self.structured.name(), self.structured.path().display());
        let structured = self.structured.parse();

        info!("Parsing {} log: {}", self.pixel.name(), self.pixel.path().display());
        let pixel = self.pixel.parse();

        info!("Parsing {} log: {}", self.credential.name(), self.credential.path().display());
        let credential = self.credential.parse();

        info!("Consolidating...");
        let rows = reconcile(&structured.entries, &pixel.entries, &credential.entries);

        (rows, [structured.stats, pixel.stats, credential.stats])
    }

    /// Run the pipeline and write the report.
    ///
    /// # Errors
    ///
    /// Fails only if the report cannot be written.
    pub fn run(&self) -> Result<RunSummary> {
        let (rows, [structured, pixel, credential]) = self.build_rows();
        let funnel = FunnelSummary::from_rows(&rows);

        info!("Writing CSV...");
        self.writer.write(&rows)?;

        info!(
            recipients = funnel.recipients,
            sent = funnel.sent,
            opened = funnel.opened,
            clicked = funnel.clicked,
            submitted = funnel.submitted,
            "report complete"
        );

        Ok(RunSummary {
            structured,
            pixel,
            credential,
            funnel,
            output: self.writer.path().to_path_buf(),
        })
    }
}
