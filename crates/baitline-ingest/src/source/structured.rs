//! Structured event feed adapter.
//!
//! Reads a single JSON array of records:
//!
//! ```json
//! [{"email": "alice@example.com", "status": "Email Sent", "time": "2024-01-01 10:00:00"}]
//! ```
//!
//! Absent (or `null`) fields take defaults: `email` becomes
//! `unknown@example.com`, `status` and `time` become empty strings. Unknown
//! keys are ignored. When a record repeats a key, the last occurrence wins.
//! A field holding anything other than a string or `null` makes the whole
//! file malformed.

use super::{LogSource, Parsed, SourceStats};
use baitline_core::{Event, IdentityMap, StatusFlags, push_entry};
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Identity used for records that carry no `email`.
pub const UNKNOWN_IDENTITY: &str = "unknown@example.com";

/// Read a string field from one record. `null` and absent both mean `None`.
fn string_field(
    record: &Map<String, Value>,
    key: &str,
) -> std::result::Result<Option<String>, String> {
    match record.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(format!("field `{}` is not a string: {}", key, other)),
    }
}

/// Structured (JSON) event source.
pub struct StructuredSource {
    path: PathBuf,
}

impl StructuredSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LogSource for StructuredSource {
    type Entry = Event;

    fn name(&self) -> &'static str {
        "structured"
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self) -> Parsed<Event> {
        let mut stats = SourceStats::default();

        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Missing {} log: {}", self.name(), self.path.display());
                stats.missing = true;
                return Parsed::empty(stats);
            }
            Err(e) => {
                warn!("Failed to read {} log {}: {}", self.name(), self.path.display(), e);
                stats.unreadable += 1;
                return Parsed::empty(stats);
            }
        };

        // serde_json keeps the last value when an object repeats a key.
        let records: Vec<Map<String, Value>> = match serde_json::from_str(&content) {
            Ok(r) => r,
            Err(e) => {
                warn!("Invalid JSON in {}: {}", self.path.display(), e);
                stats.malformed = true;
                return Parsed::empty(stats);
            }
        };

        let mut events = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let fields = string_field(record, "email").and_then(|email| {
                Ok((email, string_field(record, "status")?, string_field(record, "time")?))
            });
            match fields {
                Ok(fields) => events.push(fields),
                Err(e) => {
                    warn!("Invalid record {} in {}: {}", index, self.path.display(), e);
                    stats.malformed = true;
                    return Parsed::empty(stats);
                }
            }
        }

        let mut entries = IdentityMap::new();
        for (email, status, time) in events {
            let identity = email.unwrap_or_else(|| UNKNOWN_IDENTITY.to_string());
            let status = status.unwrap_or_default();
            if StatusFlags::classify(&status).is_unrecognized() {
                debug!(
                    "{} log: status {:?} for {} matches no keyword",
                    self.name(),
                    status,
                    identity
                );
                stats.unclassified += 1;
            }
            push_entry(&mut entries, identity, Event::structured(status, time.unwrap_or_default()));
            stats.entries += 1;
        }

        stats.identities = entries.len();
        info!(
            "Parsed {} log: {} records for {} identities ({} unclassified)",
            self.name(),
            stats.entries,
            stats.identities,
            stats.unclassified
        );

        Parsed { entries, stats }
    }
}
