//! Baitline report pipeline.
//!
//! This crate reads the activity logs of a phishing-simulation exercise and
//! consolidates them into one CSV row per recipient.
//!
//! # Modules
//!
//! - [`source`] - Log adapters (structured JSON feed, pixel-open log, credential log)
//! - [`report`] - CSV report writer
//! - [`pipeline`] - Parse → reconcile → write, end to end
//! - [`config`] - Input and output paths
//!
//! # Architecture
//!
//! ```text
//! [StructuredSource] ─┐
//! [PixelSource]      ─┼─→ identity → entries ─→ [reconcile] ─→ [ReportWriter]
//! [CredentialSource] ─┘                                             ↓
//!                                                        phishing_report.csv
//! ```
//!
//! Input problems never stop a run: a missing or malformed log simply
//! contributes nothing. Failing to write the report is the only error.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod source;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

pub use config::PathsConfig;
pub use pipeline::{Pipeline, RunSummary};
pub use report::ReportWriter;
pub use source::{
    CredentialSource, LogSource, Parsed, PixelSource, SourceStats, StructuredSource,
};
