//! Credential-capture log adapter.
//!
//! One line per captured submission:
//!
//! ```text
//! 2024-01-01 10:10:00 - IP: 1.2.3.4 - Username: alice@example.com Password: hunter2
//! ```
//!
//! The username is the non-space run after `Username: `; the password is the
//! rest of the line after `Password: `, trimmed. Lines without both labels
//! are skipped. Labels are matched case-sensitively.
//!
//! Passwords are kept in clear text. They flow into the report unchanged.

use super::lines::parse_line_log;
use super::{LogSource, Parsed};
use crate::Result;
use baitline_core::{CompiledGrammar, CredentialSubmission, LineGrammar};
use std::path::{Path, PathBuf};

/// Credential-capture log source.
pub struct CredentialSource {
    path: PathBuf,
    grammar: CompiledGrammar,
}

impl CredentialSource {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            path: path.into(),
            grammar: LineGrammar::credential_capture().compile()?,
        })
    }
}

impl LogSource for CredentialSource {
    type Entry = CredentialSubmission;

    fn name(&self) -> &'static str {
        "credential"
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self) -> Parsed<CredentialSubmission> {
        parse_line_log(self.name(), &self.path, &self.grammar, |m| {
            let ts = m.get(LineGrammar::TIMESTAMP)?;
            let user = m.get(LineGrammar::USERNAME)?.trim();
            let pwd = m.get(LineGrammar::PASSWORD)?.trim();
            Some((user.to_string(), CredentialSubmission::new(ts, pwd)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn source_with(content: &str) -> (TempDir, CredentialSource) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("credentials.log");
        fs::write(&path, content).unwrap();
        let source = CredentialSource::new(path).unwrap();
        (tmp, source)
    }

    #[test]
    fn test_missing_file() {
        let tmp = TempDir::new().unwrap();
        let source = CredentialSource::new(tmp.path().join("credentials.log")).unwrap();
        let parsed = source.parse();
        assert!(parsed.entries.is_empty());
        assert!(parsed.stats.missing);
    }

    #[test]
    fn test_parses_submission() {
        let (_tmp, source) = source_with(
            "2024-01-01 10:10:00 - IP: 1.2.3.4 - Username: a@x.com Password: hunter2\n",
        );
        let parsed = source.parse();
        let subs = &parsed.entries["a@x.com"];
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].timestamp, "2024-01-01 10:10:00");
        assert_eq!(subs[0].password, "hunter2");
    }

    #[test]
    fn test_line_without_password_skipped() {
        let (_tmp, source) = source_with(
            "2024-01-01 10:10:00 - IP: 1.2.3.4 - Username: a@x.com\n\
             2024-01-01 10:11:00 - IP: 1.2.3.4 - Username: b@x.com Password: pw\n",
        );
        let parsed = source.parse();
        assert!(!parsed.entries.contains_key("a@x.com"));
        assert!(parsed.entries.contains_key("b@x.com"));
        assert_eq!(parsed.stats.unmatched, 1);
        assert_eq!(parsed.stats.entries, 1);
    }

    #[test]
    fn test_repeated_submissions_keep_order() {
        let (_tmp, source) = source_with(
            "2024-01-02 08:00:00 - Username: a@x.com Password: second-try\n\
             2024-01-01 08:00:00 - Username: a@x.com Password: first-try\n",
        );
        let parsed = source.parse();
        let subs = &parsed.entries["a@x.com"];
        assert_eq!(subs[0].password, "second-try");
        assert_eq!(subs[1].password, "first-try");
    }

    #[test]
    fn test_password_with_spaces_and_trailing_whitespace() {
        let (_tmp, source) = source_with(
            "2024-01-01 10:10:00 - Username: bob Password:  p@ss w0rd \t\n",
        );
        let parsed = source.parse();
        assert_eq!(parsed.entries["bob"][0].password, "p@ss w0rd");
    }

    #[test]
    fn test_uppercase_labels_not_recognized() {
        let (_tmp, source) = source_with(
            "2024-01-01 10:10:00 - IP: 127.0.0.1 - USERNAME: a@x.com - PASSWORD: pw\n",
        );
        let parsed = source.parse();
        assert!(parsed.entries.is_empty());
        assert_eq!(parsed.stats.unmatched, 1);
    }
}
