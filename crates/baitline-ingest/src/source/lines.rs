//! Shared reader for the newline-delimited free-text logs.

use super::{Parsed, SourceStats};
use baitline_core::{CompiledGrammar, Identity, IdentityMap, LineMatch, push_entry};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, warn};

/// Split on `\r\n`, a lone `\r`, or `\n`. A trailing terminator does not
/// produce an extra empty line.
fn split_lines(bytes: &[u8]) -> Vec<&[u8]> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&bytes[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&bytes[start..i]);
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < bytes.len() {
        lines.push(&bytes[start..]);
    }

    lines
}

/// Parse `path` line by line against `grammar`.
///
/// Each line is trimmed before matching. `extract` turns a match into an
/// `(identity, entry)` pair; returning `None` counts the line as unmatched.
pub(super) fn parse_line_log<T, F>(
    name: &str,
    path: &Path,
    grammar: &CompiledGrammar,
    mut extract: F,
) -> Parsed<T>
where
    F: FnMut(&LineMatch<'_>) -> Option<(Identity, T)>,
{
    let mut stats = SourceStats::default();

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Missing {} log: {}", name, path.display());
            stats.missing = true;
            return Parsed::empty(stats);
        }
        Err(e) => {
            warn!("Failed to read {} log {}: {}", name, path.display(), e);
            stats.unreadable += 1;
            return Parsed::empty(stats);
        }
    };

    debug!("{} grammar: {}", name, grammar.pattern());
    let mut entries = IdentityMap::new();

    for (line_num, chunk) in split_lines(&bytes).into_iter().enumerate() {
        stats.lines += 1;

        let line = match std::str::from_utf8(chunk) {
            Ok(l) => l.trim(),
            Err(e) => {
                warn!("{} log line {}: not valid UTF-8: {}", name, line_num + 1, e);
                stats.unreadable += 1;
                continue;
            }
        };

        if line.is_empty() {
            stats.blank_lines += 1;
            continue;
        }

        match grammar.match_line(line).and_then(|m| extract(&m)) {
            Some((identity, entry)) => {
                push_entry(&mut entries, identity, entry);
                stats.entries += 1;
            }
            None => {
                debug!("{} log line {}: no match, skipped", name, line_num + 1);
                stats.unmatched += 1;
            }
        }
    }

    stats.identities = entries.len();
    info!(
        "Parsed {} log: {} entries for {} identities ({} lines, {} skipped)",
        name, stats.entries, stats.identities, stats.lines, stats.unmatched
    );

    Parsed { entries, stats }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_terminators() {
        let lines = split_lines(b"a\nb\r\nc\rd");
        assert_eq!(lines, vec![&b"a"[..], &b"b"[..], &b"c"[..], &b"d"[..]]);
    }

    #[test]
    fn test_split_lines_trailing_terminator() {
        assert_eq!(split_lines(b"a\r\n"), vec![&b"a"[..]]);
        assert_eq!(split_lines(b"a\r"), vec![&b"a"[..]]);
        assert!(split_lines(b"").is_empty());
    }

    #[test]
    fn test_split_lines_keeps_blank_lines() {
        assert_eq!(split_lines(b"\n\r\na"), vec![&b""[..], &b""[..], &b"a"[..]]);
    }
}
