//! Sync layer: pulls the OCDS release feed from the tender publication API.

pub mod http;

pub use http::{DEFAULT_TIMEOUT, FIND_A_TENDER_FEED, FeedClient, ReleaseSource, SyncError};
