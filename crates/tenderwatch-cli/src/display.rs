//! Card display for tender listings in the terminal.

use chrono::{DateTime, Utc};
use tenderwatch_core::{TenderRecord, closes_within};
use tenderwatch_service::TenderListing;

const MAX_DESCRIPTION_CHARS: usize = 200;
const CLOSING_SOON_DAYS: i64 = 14;
const RULE_WIDTH: usize = 72;

/// Render every tender as a card, headed by the count and capture time.
pub fn render_listing(listing: &TenderListing, now: DateTime<Utc>) -> String {
    let updated = match listing.last_updated {
        Some(at) => at.format("%d %b %Y %H:%M UTC").to_string(),
        None => "never".to_string(),
    };
    let mut out = format!("{} tenders (last updated {updated})\n", listing.count());

    for tender in &listing.tenders {
        out.push('\n');
        render_card(&mut out, tender, now);
    }
    out
}

fn render_card(out: &mut String, tender: &TenderRecord, now: DateTime<Utc>) {
    let heading = format!("── {} ", tender.title);
    let pad = RULE_WIDTH.saturating_sub(heading.chars().count());
    out.push_str(&format!("{heading}{}\n", "─".repeat(pad)));

    field(out, "Buyer", &tender.buyer);
    field(out, "Value", tender.value.as_deref().unwrap_or("-"));
    if closes_within(tender, now, CLOSING_SOON_DAYS) {
        field(out, "Deadline", &format!("{}  [closing soon]", tender.deadline));
    } else {
        field(out, "Deadline", &tender.deadline);
    }
    field(out, "Status", &tender.status);
    if !tender.date.is_empty() {
        field(out, "Published", &tender.date);
    }
    if let Some(url) = &tender.url {
        field(out, "Link", url);
    }
    out.push_str(&format!(
        "  {}\n",
        truncate(&tender.description, MAX_DESCRIPTION_CHARS)
    ));
}

fn field(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("  {label:<10} {value}\n"));
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", text[..cut].trim_end()),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
    }

    fn tender(deadline: &str, url: Option<&str>) -> TenderRecord {
        TenderRecord {
            id: "rel-1".into(),
            ocid: "ocds-h6vhtk-0001".into(),
            title: "Falls prevention service".into(),
            description: "Community falls prevention across BNSSG".into(),
            buyer: "NHS BNSSG ICB".into(),
            deadline: deadline.into(),
            value: Some("GBP 12,345.50".into()),
            url: url.map(str::to_string),
            date: "2026-10-02T10:15:00Z".into(),
            status: "active".into(),
        }
    }

    #[test]
    fn renders_header_and_card() {
        let listing = TenderListing {
            tenders: vec![tender("2026-11-30T12:00:00Z", Some("https://x"))],
            last_updated: Some(now()),
        };
        let text = render_listing(&listing, now());
        assert!(text.starts_with("1 tenders (last updated 17 Oct 2026 12:00 UTC)"));
        assert!(text.contains("── Falls prevention service"));
        assert!(text.contains("  Buyer      NHS BNSSG ICB"));
        assert!(text.contains("  Value      GBP 12,345.50"));
        assert!(text.contains("  Link       https://x"));
        assert!(!text.contains("closing soon"));
    }

    #[test]
    fn card_lines_in_order() {
        let listing = TenderListing {
            tenders: vec![tender("2026-11-30T12:00:00Z", None)],
            last_updated: None,
        };
        let text = render_listing(&listing, now());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "1 tenders (last updated never)");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2].chars().count(), RULE_WIDTH);
        assert_eq!(
            &lines[3..],
            [
                "  Buyer      NHS BNSSG ICB",
                "  Value      GBP 12,345.50",
                "  Deadline   2026-11-30T12:00:00Z",
                "  Status     active",
                "  Published  2026-10-02T10:15:00Z",
                "  Community falls prevention across BNSSG",
            ]
        );
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn marks_tenders_closing_soon() {
        let listing = TenderListing {
            tenders: vec![tender("2026-10-20T12:00:00Z", None)],
            last_updated: Some(now()),
        };
        let text = render_listing(&listing, now());
        assert!(text.contains("2026-10-20T12:00:00Z  [closing soon]"));
        assert!(!text.contains("Link"));
    }

    #[test]
    fn empty_listing_never_updated() {
        let text = render_listing(&TenderListing::empty(), now());
        assert_eq!(text, "0 tenders (last updated never)\n");
    }

    #[test]
    fn long_descriptions_are_truncated() {
        let long = "é".repeat(250);
        let cut = truncate(&long, 200);
        assert_eq!(cut.chars().count(), 203);
        assert!(cut.ends_with("..."));
        assert_eq!(truncate("short", 200), "short");
    }
}
