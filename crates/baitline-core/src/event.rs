//! Per-source event types and the identity-keyed mapping they are grouped into.
//!
//! Each parsed log becomes an [`IdentityMap`]: recipient identity to the
//! entries that identity produced, in file order. Identities are compared by
//! exact string match only. No case-folding or aliasing is applied, so
//! `Alice@x.com` and `alice@x.com` are two different recipients.

use std::collections::BTreeMap;
use std::fmt;

/// A recipient key: normally an email address, but the pixel log may yield
/// an opaque tracking token with no `@`.
pub type Identity = String;

/// Identity to entries, in source order.
///
/// "First" always means first in this order, never chronologically first:
/// timestamps are opaque strings and are never sorted.
pub type IdentityMap<T> = BTreeMap<Identity, Vec<T>>;

/// Append `entry` to the list for `identity`, creating it on first sight.
pub fn push_entry<T>(map: &mut IdentityMap<T>, identity: impl Into<Identity>, entry: T) {
    map.entry(identity.into()).or_default().push(entry);
}

/// Which log an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// The structured (JSON array) event feed.
    Structured,
    /// The free-text tracking-pixel log.
    Pixel,
    /// The free-text credential-capture log.
    Credential,
}

impl Source {
    /// Short name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Structured => "structured",
            Source::Pixel => "pixel",
            Source::Credential => "credential",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One status observation for a recipient.
///
/// `timestamp` is kept as the verbatim `YYYY-MM-DD HH:MM:SS` string from the
/// log. It is only ever selected by position, never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub source: Source,
    pub status: String,
    pub timestamp: String,
}

impl Event {
    /// Status label recorded for every tracking-pixel fetch.
    pub const PIXEL_OPEN_STATUS: &'static str = "Email Opened";

    pub fn structured(status: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            source: Source::Structured,
            status: status.into(),
            timestamp: timestamp.into(),
        }
    }

    pub fn pixel_open(timestamp: impl Into<String>) -> Self {
        Self {
            source: Source::Pixel,
            status: Self::PIXEL_OPEN_STATUS.to_string(),
            timestamp: timestamp.into(),
        }
    }
}

/// One credential submission captured by the collector.
///
/// The password is retained verbatim and ends up in clear text in the
/// generated report, exactly as it sits in the credential log. Treat both
/// files as sensitive. `Debug` output redacts it so that it never reaches
/// diagnostics.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialSubmission {
    pub timestamp: String,
    pub password: String,
}

impl CredentialSubmission {
    pub fn new(timestamp: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for CredentialSubmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSubmission")
            .field("timestamp", &self.timestamp)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_entry_preserves_order() {
        let mut map: IdentityMap<Event> = IdentityMap::new();
        push_entry(&mut map, "a@x.com", Event::structured("Email Sent", "2024-01-01 10:00:00"));
        push_entry(&mut map, "b@x.com", Event::structured("Email Sent", "2024-01-01 09:00:00"));
        push_entry(&mut map, "a@x.com", Event::structured("Clicked Link", "2024-01-01 08:00:00"));

        let a = &map["a@x.com"];
        assert_eq!(a.len(), 2);
        assert_eq!(a[0].status, "Email Sent");
        assert_eq!(a[1].status, "Clicked Link");
        assert_eq!(map["b@x.com"].len(), 1);
    }

    #[test]
    fn test_identities_are_case_sensitive() {
        let mut map: IdentityMap<Event> = IdentityMap::new();
        push_entry(&mut map, "A@x.com", Event::pixel_open("2024-01-01 10:00:00"));
        push_entry(&mut map, "a@x.com", Event::pixel_open("2024-01-01 10:00:01"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_pixel_event_source() {
        let event = Event::pixel_open("2024-01-01 10:05:00");
        assert_eq!(event.source, Source::Pixel);
        assert_eq!(event.status, Event::PIXEL_OPEN_STATUS);
        assert_eq!(event.timestamp, "2024-01-01 10:05:00");
    }

    #[test]
    fn test_credential_debug_redacts_password() {
        let sub = CredentialSubmission::new("2024-01-01 10:10:00", "hunter2");
        let debug = format!("{:?}", sub);
        assert!(debug.contains("2024-01-01 10:10:00"));
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("hunter2"));
        // The value itself is untouched.
        assert_eq!(sub.password, "hunter2");
    }

    #[test]
    fn test_source_display() {
        assert_eq!(Source::Structured.to_string(), "structured");
        assert_eq!(Source::Pixel.to_string(), "pixel");
        assert_eq!(Source::Credential.to_string(), "credential");
    }
}
