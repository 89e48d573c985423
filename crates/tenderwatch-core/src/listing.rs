//! Ordering and windowing of tender lists for display.

use std::cmp::Ordering;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::record::TenderRecord;

/// Display order for a tender list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TenderSort {
    /// Newest release first.
    #[default]
    DateDesc,
    DateAsc,
    /// Soonest closing first.
    DeadlineAsc,
    DeadlineDesc,
    /// Alphabetical by title, ignoring case.
    Title,
}

/// Sort in place. In the date and deadline orders, records whose timestamp
/// does not parse go last.
pub fn sort_tenders(tenders: &mut [TenderRecord], order: TenderSort) {
    match order {
        TenderSort::DateDesc => tenders.sort_by(|a, b| by_key(&a.date, &b.date, true)),
        TenderSort::DateAsc => tenders.sort_by(|a, b| by_key(&a.date, &b.date, false)),
        TenderSort::DeadlineAsc => {
            tenders.sort_by(|a, b| by_key(&a.deadline, &b.deadline, false))
        }
        TenderSort::DeadlineDesc => {
            tenders.sort_by(|a, b| by_key(&a.deadline, &b.deadline, true))
        }
        TenderSort::Title => tenders.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.title.cmp(&b.title))
        }),
    }
}

fn by_key(a: &str, b: &str, descending: bool) -> Ordering {
    match (parse_timestamp(a), parse_timestamp(b)) {
        (Some(x), Some(y)) if descending => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Whether the record's release date falls inside `[from, to]` (calendar days, UTC).
///
/// With no bounds every record passes; with any bound set, a record whose
/// date does not parse is excluded.
pub fn within_dates(
    record: &TenderRecord,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> bool {
    if from.is_none() && to.is_none() {
        return true;
    }
    let Some(day) = parse_timestamp(&record.date).map(|d| d.date_naive()) else {
        return false;
    };
    from.is_none_or(|f| day >= f) && to.is_none_or(|t| day <= t)
}

/// Whether the tender closes between `now` and `days` from now.
pub fn closes_within(record: &TenderRecord, now: DateTime<Utc>, days: i64) -> bool {
    parse_timestamp(&record.deadline)
        .is_some_and(|deadline| deadline >= now && deadline - now <= Duration::days(days))
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
