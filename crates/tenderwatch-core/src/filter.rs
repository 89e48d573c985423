//! Select tender-stage releases that mention the watched keyword.

use serde_json::Value;
use tracing::debug;

use crate::extract::extract_tender_with_origin;
use crate::matcher::contains_keyword;
use crate::record::TenderRecord;

const TENDER_TAG: &str = "tender";

/// Whether the release's `tag` labels include the tender stage.
pub fn is_tender_stage(release: &Value) -> bool {
    release["tag"]
        .as_array()
        .is_some_and(|tags| tags.iter().any(|t| t.as_str() == Some(TENDER_TAG)))
}

/// Releases that are at tender stage and mention `keyword` anywhere.
///
/// The whole release is searched, not only its `tender` block, so a match
/// on a party name or document title is enough. Input order is preserved.
pub fn filter_releases<'a>(releases: &'a [Value], keyword: &str) -> Vec<&'a Value> {
    let matched: Vec<&Value> = releases
        .iter()
        .filter(|release| is_tender_stage(release) && contains_keyword(release, keyword))
        .collect();
    debug!(
        total = releases.len(),
        matched = matched.len(),
        keyword,
        "filtered releases"
    );
    matched
}

/// Filter the feed and flatten each match into a [`TenderRecord`].
pub fn collect_tenders(releases: &[Value], keyword: &str, origin: &str) -> Vec<TenderRecord> {
    filter_releases(releases, keyword)
        .into_iter()
        .map(|release| extract_tender_with_origin(release, origin))
        .collect()
}
