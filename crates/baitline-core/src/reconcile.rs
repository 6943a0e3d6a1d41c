//! Reconciliation of the three parsed sources into one row per recipient.
//!
//! # Identity set
//!
//! The report covers the union of:
//! - every identity in the structured feed,
//! - every pixel-log identity containing `@`,
//! - every credential-log identity.
//!
//! Pixel identities without `@` (opaque tracking tokens) are kept in the
//! pixel map but do not add rows of their own. They still count as an open
//! for a row that some other source brings in under the same exact key.
//!
//! # Derivation
//!
//! | Field       | Source of truth                                                |
//! |-------------|----------------------------------------------------------------|
//! | sent        | structured status contains "sent"                              |
//! | opened      | any pixel hit, or structured status contains "open"            |
//! | clicked     | structured status contains "click"                             |
//! | submitted   | any credential entry, or structured status contains "submitted"|
//!
//! Each first-timestamp field prefers the free-text log (pixel for opens,
//! credential for submits) and falls back to the first matching structured
//! event. The flags are independent signals: a submit does not imply a click.

use crate::event::{CredentialSubmission, Event, IdentityMap};
use crate::status::{StatusFlags, StatusKeyword};
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;

/// Column headers of the report, in order.
pub const REPORT_COLUMNS: [&str; 10] = [
    "Email/Recipient",
    "Email Sent",
    "Email Sent Timestamp",
    "Opened",
    "First Open Timestamp",
    "Clicked Link",
    "First Click Timestamp",
    "Credentials Submitted",
    "First Submit Timestamp",
    "Captured Password (sample)",
];

/// One reconciled report line.
///
/// `password_sample` is the clear-text password from the recipient's first
/// credential submission. It is written to the report unmodified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "Email/Recipient")]
    pub identity: String,

    #[serde(rename = "Email Sent", serialize_with = "yes_no")]
    pub sent: bool,

    #[serde(rename = "Email Sent Timestamp")]
    pub sent_at: String,

    #[serde(rename = "Opened", serialize_with = "yes_no")]
    pub opened: bool,

    #[serde(rename = "First Open Timestamp")]
    pub first_open_at: String,

    #[serde(rename = "Clicked Link", serialize_with = "yes_no")]
    pub clicked: bool,

    #[serde(rename = "First Click Timestamp")]
    pub first_click_at: String,

    #[serde(rename = "Credentials Submitted", serialize_with = "yes_no")]
    pub submitted: bool,

    #[serde(rename = "First Submit Timestamp")]
    pub first_submit_at: String,

    #[serde(rename = "Captured Password (sample)")]
    pub password_sample: String,
}

fn yes_no<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(if *value { "Yes" } else { "No" })
}

/// Merge the parsed sources into report rows sorted by identity.
///
/// Pure and infallible: missing data produces `false` flags and empty
/// strings.
pub fn reconcile(
    structured: &IdentityMap<Event>,
    pixel: &IdentityMap<Event>,
    credential: &IdentityMap<CredentialSubmission>,
) -> Vec<ReportRow> {
    let identities = report_identities(structured, pixel, credential);

    identities
        .into_iter()
        .map(|identity| {
            let events = structured.get(identity).map(Vec::as_slice).unwrap_or(&[]);
            let opens = pixel.get(identity).map(Vec::as_slice).unwrap_or(&[]);
            let creds = credential.get(identity).map(Vec::as_slice).unwrap_or(&[]);

            let classified: Vec<(StatusFlags, &Event)> = events
                .iter()
                .map(|e| (StatusFlags::classify(&e.status), e))
                .collect();
            let has = |kw: StatusKeyword| classified.iter().any(|(flags, _)| flags.has(kw));
            let first = |kw: StatusKeyword| first_structured(&classified, kw);

            ReportRow {
                identity: identity.to_string(),
                sent: has(StatusKeyword::Sent),
                sent_at: first(StatusKeyword::Sent),
                opened: !opens.is_empty() || has(StatusKeyword::Open),
                first_open_at: match opens.first() {
                    Some(open) => open.timestamp.clone(),
                    None => first(StatusKeyword::Open),
                },
                clicked: has(StatusKeyword::Click),
                first_click_at: first(StatusKeyword::Click),
                submitted: !creds.is_empty() || has(StatusKeyword::Submitted),
                first_submit_at: match creds.first() {
                    Some(sub) => sub.timestamp.clone(),
                    None => first(StatusKeyword::Submitted),
                },
                password_sample: creds
                    .first()
                    .map(|sub| sub.password.clone())
                    .unwrap_or_default(),
            }
        })
        .collect()
}

/// The sorted, de-duplicated identity set the report covers.
pub fn report_identities<'a>(
    structured: &'a IdentityMap<Event>,
    pixel: &'a IdentityMap<Event>,
    credential: &'a IdentityMap<CredentialSubmission>,
) -> BTreeSet<&'a str> {
    structured
        .keys()
        .chain(pixel.keys().filter(|id| id.contains('@')))
        .chain(credential.keys())
        .map(String::as_str)
        .collect()
}

fn first_structured(classified: &[(StatusFlags, &Event)], keyword: StatusKeyword) -> String {
    classified
        .iter()
        .find(|(flags, _)| flags.has(keyword))
        .map(|(_, e)| e.timestamp.clone())
        .unwrap_or_default()
}

/// Funnel counts across all report rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FunnelSummary {
    pub recipients: usize,
    pub sent: usize,
    pub opened: usize,
    pub clicked: usize,
    pub submitted: usize,
}

impl FunnelSummary {
    pub fn from_rows(rows: &[ReportRow]) -> Self {
        rows.iter().fold(
            Self {
                recipients: rows.len(),
                ..Default::default()
            },
            |mut acc, row| {
                acc.sent += usize::from(row.sent);
                acc.opened += usize::from(row.opened);
                acc.clicked += usize::from(row.clicked);
                acc.submitted += usize::from(row.submitted);
                acc
            },
        )
    }
}
