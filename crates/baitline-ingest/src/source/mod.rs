//! Log source adapters.
//!
//! Each adapter reads one log file and groups its entries by recipient
//! identity, preserving file order.
//!
//! # Available Sources
//!
//! - [`StructuredSource`] - JSON array of `{email, status, time}` records
//! - [`PixelSource`] - Free-text tracking-pixel open log
//! - [`CredentialSource`] - Free-text credential-capture log
//!
//! # Failure policy
//!
//! Parsing never fails. A missing, unreadable, or malformed file degrades
//! the source to an empty mapping and emits a `warn!` diagnostic. Lines of a
//! free-text log that do not fit its grammar are skipped silently.

mod credential;
mod lines;
mod pixel;
mod structured;

pub use credential::CredentialSource;
pub use pixel::PixelSource;
pub use structured::StructuredSource;

use baitline_core::IdentityMap;
use std::path::Path;

/// A log file that parses into an identity-keyed mapping.
pub trait LogSource {
    /// What one matched entry carries.
    type Entry;

    /// Human-readable name for this source (used in logs).
    fn name(&self) -> &'static str;

    /// The file this source reads.
    fn path(&self) -> &Path;

    /// Read and parse the whole file.
    fn parse(&self) -> Parsed<Self::Entry>;
}

/// Output of one source: entries by identity plus what happened on the way.
#[derive(Debug, Clone)]
pub struct Parsed<T> {
    pub entries: IdentityMap<T>,
    pub stats: SourceStats,
}

impl<T> Parsed<T> {
    fn empty(stats: SourceStats) -> Self {
        Self {
            entries: IdentityMap::new(),
            stats,
        }
    }
}

/// Statistics from parsing a log source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceStats {
    /// The file did not exist.
    pub missing: bool,

    /// The file existed but was not a valid structured document.
    pub malformed: bool,

    /// Lines read (free-text logs only).
    pub lines: usize,

    /// Blank lines skipped.
    pub blank_lines: usize,

    /// Entries accepted into the mapping.
    pub entries: usize,

    /// Lines that did not fit the grammar.
    pub unmatched: usize,

    /// Lines or files that could not be read (I/O error, invalid UTF-8).
    pub unreadable: usize,

    /// Structured records whose status matched no keyword.
    pub unclassified: usize,

    /// Distinct identities in the mapping.
    pub identities: usize,
}

impl SourceStats {
    /// True when the source contributed nothing because of a problem with
    /// the file itself.
    pub fn degraded(&self) -> bool {
        self.missing || self.malformed || (self.entries == 0 && self.unreadable > 0)
    }
}
