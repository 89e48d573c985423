//! Flatten one OCDS release into a [`TenderRecord`].
//!
//! Releases from the feed are loosely shaped: any field may be missing,
//! `null`, or of an unexpected type. Extraction never fails; each field
//! falls back to the default documented on [`TenderRecord`].

use serde_json::Value;

use crate::record::{NO_DESCRIPTION, NOT_SPECIFIED, TenderRecord, UNKNOWN, UNTITLED};

/// Origin used to build notice links when a release carries no document URL.
pub const FIND_A_TENDER_ORIGIN: &str = "https://www.find-tender.service.gov.uk";

const DEFAULT_CURRENCY: &str = "GBP";
const BUYER_ROLE: &str = "buyer";

/// Extract a tender record, linking to Find a Tender notices as a fallback.
pub fn extract_tender(release: &Value) -> TenderRecord {
    extract_tender_with_origin(release, FIND_A_TENDER_ORIGIN)
}

/// Extract a tender record, building fallback notice links under `origin`.
pub fn extract_tender_with_origin(release: &Value, origin: &str) -> TenderRecord {
    let tender = &release["tender"];
    let ocid = text(&release["ocid"]).unwrap_or_default();

    TenderRecord {
        id: text(&release["id"]).unwrap_or_default(),
        title: text_or(&tender["title"], UNTITLED),
        description: text_or(&tender["description"], NO_DESCRIPTION),
        buyer: buyer_name(&release["parties"]),
        deadline: text_or(&tender["tenderPeriod"]["endDate"], NOT_SPECIFIED),
        value: tender_value(&tender["value"]),
        url: document_url(&tender["documents"]).or_else(|| notice_url(origin, &ocid)),
        date: text(&release["date"]).unwrap_or_default(),
        status: text_or(&tender["status"], UNKNOWN),
        ocid,
    }
}

/// Render an amount as `"<CURRENCY> 12,345.50"`.
///
/// Returns `None` for a zero amount, matching how the feed marks an
/// undisclosed value.
pub fn format_value(amount: f64, currency: &str) -> Option<String> {
    if amount == 0.0 || !amount.is_finite() {
        return None;
    }
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 { "-" } else { "" };
    Some(format!("{currency} {sign}{}.{cents}", group_thousands(whole)))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Name of the first party holding the buyer role.
///
/// The search stops at the first buyer even if that party has no name.
fn buyer_name(parties: &Value) -> String {
    let Some(parties) = parties.as_array() else {
        return UNKNOWN.to_string();
    };
    parties
        .iter()
        .find(|party| has_role(party, BUYER_ROLE))
        .and_then(|party| text(&party["name"]))
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn has_role(party: &Value, role: &str) -> bool {
    party["roles"]
        .as_array()
        .is_some_and(|roles| roles.iter().any(|r| r.as_str() == Some(role)))
}

fn tender_value(value: &Value) -> Option<String> {
    let amount = value["amount"].as_f64()?;
    let currency = value["currency"].as_str().unwrap_or(DEFAULT_CURRENCY);
    format_value(amount, currency)
}

/// First document (in feed order) with a non-empty `url`.
fn document_url(documents: &Value) -> Option<String> {
    documents
        .as_array()?
        .iter()
        .filter_map(|doc| doc["url"].as_str())
        .find(|url| !url.is_empty())
        .map(str::to_string)
}

fn notice_url(origin: &str, ocid: &str) -> Option<String> {
    if ocid.is_empty() {
        return None;
    }
    Some(format!("{}/Notice/{ocid}", origin.trim_end_matches('/')))
}

/// Text of a string or number field; anything else counts as absent.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text_or(value: &Value, default: &str) -> String {
    text(value).unwrap_or_else(|| default.to_string())
}
