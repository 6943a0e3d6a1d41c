//! Baitline report generator.
//!
//! Parses the phishing-simulation logs and writes a per-recipient CSV report.
//!
//! # Usage
//!
//! ```bash
//! # Conventional layout: logs/gophish_logs.json, logs/email_opens.log,
//! # logs/credentials.log → logs/phishing_report.csv
//! baitline
//!
//! # Different logs directory
//! baitline --logs-dir /srv/campaign-7/logs
//!
//! # Individual overrides
//! baitline --pixel-log /var/www/logs/email_opens.log --output ./report.csv
//! ```

use anyhow::{Context, Result};
use baitline_ingest::source::SourceStats;
use baitline_ingest::{PathsConfig, Pipeline, RunSummary};
use clap::Parser;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Consolidate phishing-simulation logs into a per-recipient report.
#[derive(Parser, Debug)]
#[command(name = "baitline")]
#[command(about = "Build a per-recipient phishing-simulation report from activity logs")]
#[command(version)]
struct Args {
    /// Directory holding the logs and the generated report
    #[arg(long, env = "BAITLINE_LOGS_DIR", default_value = "logs")]
    logs_dir: PathBuf,

    /// Structured event log (JSON array); defaults to <logs-dir>/gophish_logs.json
    #[arg(long)]
    structured_log: Option<PathBuf>,

    /// Pixel-open log; defaults to <logs-dir>/email_opens.log
    #[arg(long)]
    pixel_log: Option<PathBuf>,

    /// Credential-capture log; defaults to <logs-dir>/credentials.log
    #[arg(long)]
    credential_log: Option<PathBuf>,

    /// Report destination; defaults to <logs-dir>/phishing_report.csv
    #[arg(long, short)]
    output: Option<PathBuf>,
}

impl Args {
    fn paths(&self) -> PathsConfig {
        let defaults = PathsConfig::in_dir(&self.logs_dir);
        PathsConfig {
            structured_log: self.structured_log.clone().unwrap_or(defaults.structured_log),
            pixel_log: self.pixel_log.clone().unwrap_or(defaults.pixel_log),
            credential_log: self.credential_log.clone().unwrap_or(defaults.credential_log),
            output: self.output.clone().unwrap_or(defaults.output),
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let args = Args::parse();
    let paths = args.paths();
    let output = paths.output.clone();

    let start = Instant::now();
    let pipeline = Pipeline::new(paths).context("Failed to build log grammars")?;
    let summary = pipeline
        .run()
        .with_context(|| format!("Failed to write report to {}", output.display()))?;

    print_summary(&summary, start.elapsed());

    Ok(())
}

fn print_summary(summary: &RunSummary, elapsed: Duration) {
    println!("\n══════════════════════════════════════════════════════════════════");
    println!("SUMMARY");
    println!("══════════════════════════════════════════════════════════════════\n");

    print_source("Structured", &summary.structured);
    print_source("Pixel", &summary.pixel);
    print_source("Credential", &summary.credential);
    println!();

    let funnel = &summary.funnel;
    println!("Recipients:        {:>12}", funnel.recipients);
    println!("  - Sent:            {:>10}", funnel.sent);
    println!("  - Opened:          {:>10}", funnel.opened);
    println!("  - Clicked:         {:>10}", funnel.clicked);
    println!("  - Submitted:       {:>10}", funnel.submitted);
    println!();
    println!("Report:      {}", summary.output.display());
    println!("Elapsed time:      {:>12.2?}", elapsed);
    println!();
}

fn print_source(label: &str, stats: &SourceStats) {
    println!("{}", source_line(label, stats));
}

fn source_line(label: &str, stats: &SourceStats) -> String {
    let label = format!("{}:", label);
    if stats.missing {
        format!("{:<12} missing", label)
    } else if stats.malformed {
        format!("{:<12} malformed, ignored", label)
    } else if stats.degraded() {
        format!("{:<12} unreadable, ignored", label)
    } else {
        format!(
            "{:<12} {:>8} entries, {:>6} identities, {:>6} skipped lines",
            label,
            stats.entries,
            stats.identities,
            stats.unmatched + stats.unreadable
        )
    }
}
