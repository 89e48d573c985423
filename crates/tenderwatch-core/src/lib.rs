pub mod extract;
pub mod filter;
pub mod listing;
pub mod matcher;
pub mod record;

pub use extract::{FIND_A_TENDER_ORIGIN, extract_tender, extract_tender_with_origin, format_value};
pub use filter::{collect_tenders, filter_releases, is_tender_stage};
pub use listing::{TenderSort, closes_within, sort_tenders, within_dates};
pub use matcher::contains_keyword;
pub use record::{Snapshot, TenderRecord};
