//! Tender listing orchestration: cache check, live fetch, filter, persist, fallback.

mod clock;
pub use clock::{Clock, SystemClock};

mod service;
pub use service::{DEFAULT_KEYWORD, ServiceConfig, TenderListing, TenderService};
