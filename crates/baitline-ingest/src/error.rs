//! Error types for the ingestion pipeline.
//!
//! Only two things can fail: building a log grammar, and writing the report.
//! Problems reading the input logs are never errors; they are absorbed into
//! [`SourceStats`](crate::source::SourceStats) and reported as diagnostics.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during a pipeline run.
#[derive(Error, Debug)]
pub enum Error {
    /// A line grammar failed to compile.
    #[error("grammar error: {0}")]
    Grammar(#[from] baitline_core::Error),

    /// The report could not be created or written.
    #[error("failed to write report to {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl Error {
    pub(crate) fn output(path: impl Into<PathBuf>, source: impl Into<csv::Error>) -> Self {
        Error::Output {
            path: path.into(),
            source: source.into(),
        }
    }
}
