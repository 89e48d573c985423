//! Normalised tender types shared by the store, service, and presentation layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const UNTITLED: &str = "Untitled";
pub const NO_DESCRIPTION: &str = "No description available";
pub const UNKNOWN: &str = "Unknown";
pub const NOT_SPECIFIED: &str = "Not specified";

/// One tender notice, flattened from an OCDS release.
///
/// Every text field carries a readable default, so a record built from a
/// sparse release still renders. `value` and `url` stay `null` when the
/// release has nothing to show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenderRecord {
    pub id: String,
    pub ocid: String,
    pub title: String,
    pub description: String,
    pub buyer: String,
    /// `tenderPeriod.endDate` as published, usually ISO 8601.
    pub deadline: String,
    /// Formatted as `"<CURRENCY> 12,345.50"`.
    pub value: Option<String>,
    pub url: Option<String>,
    /// Release date as published.
    pub date: String,
    pub status: String,
}

/// The result of one successful refresh, stamped with its capture time.
///
/// Serialised as `{"last_updated": "<RFC 3339>", "tenders": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "last_updated")]
    pub captured_at: DateTime<Utc>,
    pub tenders: Vec<TenderRecord>,
}

impl Snapshot {
    pub fn new(tenders: Vec<TenderRecord>, captured_at: DateTime<Utc>) -> Self {
        Self {
            captured_at,
            tenders,
        }
    }
}
