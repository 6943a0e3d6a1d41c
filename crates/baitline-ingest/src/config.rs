//! Input and output locations for a report run.

use std::path::{Path, PathBuf};

/// Default directory holding the logs and the generated report.
pub const DEFAULT_LOGS_DIR: &str = "logs";

/// Conventional file names inside the logs directory.
pub const STRUCTURED_LOG_FILE: &str = "gophish_logs.json";
pub const PIXEL_LOG_FILE: &str = "email_opens.log";
pub const CREDENTIAL_LOG_FILE: &str = "credentials.log";
pub const REPORT_FILE: &str = "phishing_report.csv";

/// Paths the pipeline reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathsConfig {
    /// JSON array of `{email, status, time}` records.
    pub structured_log: PathBuf,

    /// Tracking-pixel open log.
    pub pixel_log: PathBuf,

    /// Credential-capture log.
    pub credential_log: PathBuf,

    /// Report destination. Overwritten on every run.
    pub output: PathBuf,
}

impl PathsConfig {
    /// All four files under their conventional names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            structured_log: dir.join(STRUCTURED_LOG_FILE),
            pixel_log: dir.join(PIXEL_LOG_FILE),
            credential_log: dir.join(CREDENTIAL_LOG_FILE),
            output: dir.join(REPORT_FILE),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self::in_dir(DEFAULT_LOGS_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = PathsConfig::default();
        assert_eq!(config.structured_log, Path::new("logs/gophish_logs.json"));
        assert_eq!(config.pixel_log, Path::new("logs/email_opens.log"));
        assert_eq!(config.credential_log, Path::new("logs/credentials.log"));
        assert_eq!(config.output, Path::new("logs/phishing_report.csv"));
    }

    #[test]
    fn test_in_dir_and_override() {
        let config = PathsConfig {
            output: PathBuf::from("/srv/out.csv"),
            ..PathsConfig::in_dir("/var/campaign")
        };
        assert_eq!(config.pixel_log, Path::new("/var/campaign/email_opens.log"));
        assert_eq!(config.output, Path::new("/srv/out.csv"));
    }
}
