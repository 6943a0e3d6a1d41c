//! Core types and pure logic for building phishing-simulation reports.
//!
//! This crate provides:
//! - Per-source event types keyed by recipient identity
//! - Closed status-keyword classification for free-text status labels
//! - Token-based line grammars for the free-text logs
//! - Reconciliation of all sources into one funnel row per recipient
//!
//! Nothing here touches the filesystem; see `baitline-ingest` for the
//! log readers and the report writer.

mod error;
mod event;
pub mod grammar;
pub mod reconcile;
pub mod status;

pub use error::{Error, Result};
pub use event::{CredentialSubmission, Event, Identity, IdentityMap, Source, push_entry};
pub use grammar::{CompiledGrammar, LineGrammar, LineMatch, Token};
pub use reconcile::{FunnelSummary, REPORT_COLUMNS, ReportRow, reconcile, report_identities};
pub use status::{StatusFlags, StatusKeyword};
