//! Tracking-pixel open log adapter.
//!
//! One line per pixel fetch:
//!
//! ```text
//! 2024-01-01 10:05:00 - Opened by recipient ID: alice@example.com
//! ```
//!
//! Everything after the first `": "` is the identity, taken verbatim. It is
//! usually an email address but may be an opaque recipient token; both are
//! stored the same way.

use super::lines::parse_line_log;
use super::{LogSource, Parsed};
use crate::Result;
use baitline_core::{CompiledGrammar, Event, LineGrammar};
use std::path::{Path, PathBuf};

/// Pixel-open log source.
pub struct PixelSource {
    path: PathBuf,
    grammar: CompiledGrammar,
}

impl PixelSource {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            path: path.into(),
            grammar: LineGrammar::pixel_open().compile()?,
        })
    }
}

impl LogSource for PixelSource {
    type Entry = Event;

    fn name(&self) -> &'static str {
        "pixel"
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self) -> Parsed<Event> {
        parse_line_log(self.name(), &self.path, &self.grammar, |m| {
            let ts = m.get(LineGrammar::TIMESTAMP)?;
            let id = m.get(LineGrammar::IDENTITY)?.trim();
            Some((id.to_string(), Event::pixel_open(ts)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baitline_core::Source;
    use std::fs;
    use tempfile::TempDir;

    fn source_with(content: &str) -> (TempDir, PixelSource) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("email_opens.log");
        fs::write(&path, content).unwrap();
        let source = PixelSource::new(path).unwrap();
        (tmp, source)
    }

    #[test]
    fn test_missing_file() {
        let tmp = TempDir::new().unwrap();
        let source = PixelSource::new(tmp.path().join("nope.log")).unwrap();
        let parsed = source.parse();
        assert!(parsed.entries.is_empty());
        assert!(parsed.stats.missing);
        assert!(parsed.stats.degraded());
    }

    #[test]
    fn test_groups_opens_in_file_order() {
        let (_tmp, source) = source_with(
            "2024-01-01 10:05:00 - opened: a@x.com\n\
             2024-01-01 10:06:00 - opened: b@x.com\n\
             2024-01-01 09:00:00 - opened: a@x.com\n",
        );
        let parsed = source.parse();

        let a = &parsed.entries["a@x.com"];
        assert_eq!(a.len(), 2);
        assert_eq!(a[0].timestamp, "2024-01-01 10:05:00");
        assert_eq!(a[1].timestamp, "2024-01-01 09:00:00");
        assert!(a.iter().all(|e| e.source == Source::Pixel));
        assert_eq!(parsed.stats.entries, 3);
        assert_eq!(parsed.stats.identities, 2);
    }

    #[test]
    fn test_blank_and_garbage_lines_skipped() {
        let (_tmp, source) = source_with(
            "\n\
             garbage line\n\
             \t  \n\
             2024-01-01 10:05:00 - opened: a@x.com\n\
             2024-01-01 - opened: b@x.com\n",
        );
        let parsed = source.parse();
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.stats.lines, 5);
        assert_eq!(parsed.stats.blank_lines, 2);
        assert_eq!(parsed.stats.unmatched, 2);
        assert!(!parsed.stats.degraded());
    }

    #[test]
    fn test_token_identity_kept_verbatim() {
        let (_tmp, source) = source_with("2024-01-01 10:05:00 - Opened by recipient ID:   rid-99  \n");
        let parsed = source.parse();
        assert_eq!(parsed.entries.keys().collect::<Vec<_>>(), vec!["rid-99"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let (_tmp, source) = source_with("2024-01-01 10:05:00 - opened: a@x.com\r\n");
        let parsed = source.parse();
        assert!(parsed.entries.contains_key("a@x.com"));
    }

    #[test]
    fn test_lone_carriage_return_separates_lines() {
        let (_tmp, source) = source_with(
            "2024-01-01 10:05:00 - opened: a@x.com\r2024-01-01 10:06:00 - opened: b@x.com\r",
        );
        let parsed = source.parse();
        assert_eq!(
            parsed.entries.keys().collect::<Vec<_>>(),
            vec!["a@x.com", "b@x.com"]
        );
        assert_eq!(parsed.entries["b@x.com"][0].timestamp, "2024-01-01 10:06:00");
        assert_eq!(parsed.stats.lines, 2);
    }

    #[test]
    fn test_invalid_utf8_line_skipped() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("email_opens.log");
        let mut bytes = b"2024-01-01 10:05:00 - opened: \xff\xfe\n".to_vec();
        bytes.extend_from_slice(b"2024-01-01 10:06:00 - opened: b@x.com\n");
        fs::write(&path, bytes).unwrap();

        let parsed = PixelSource::new(path).unwrap().parse();
        assert_eq!(parsed.stats.unreadable, 1);
        assert_eq!(parsed.entries.len(), 1);
        assert!(parsed.entries.contains_key("b@x.com"));
    }
}
