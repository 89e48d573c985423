use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tenderwatch_core::{FIND_A_TENDER_ORIGIN, Snapshot, TenderRecord, collect_tenders};
use tenderwatch_store::{SnapshotStore, is_fresh};
use tenderwatch_sync::ReleaseSource;
use tracing::{debug, error, info, warn};

use crate::clock::{Clock, SystemClock};

/// Keyword watched when none is configured.
pub const DEFAULT_KEYWORD: &str = "BNSSG";

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Matched case-insensitively against every key and value of a release.
    pub keyword: String,
    /// Origin for `/Notice/<ocid>` links on releases without a document URL.
    pub notice_origin: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            keyword: DEFAULT_KEYWORD.to_string(),
            notice_origin: FIND_A_TENDER_ORIGIN.to_string(),
        }
    }
}

/// Tenders to present, with the time they were captured.
///
/// `last_updated` is `None` only when nothing has ever been fetched and the
/// upstream feed is unavailable.
#[derive(Debug, Clone, PartialEq)]
pub struct TenderListing {
    pub tenders: Vec<TenderRecord>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl TenderListing {
    pub fn empty() -> Self {
        Self {
            tenders: Vec::new(),
            last_updated: None,
        }
    }

    pub fn count(&self) -> usize {
        self.tenders.len()
    }
}

impl From<Snapshot> for TenderListing {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            tenders: snapshot.tenders,
            last_updated: Some(snapshot.captured_at),
        }
    }
}

/// Cache-first access to the filtered tender list.
///
/// Each call reads the snapshot store at most once, calls the upstream feed
/// at most once, and writes the store only after a successful fetch.
/// Failures never reach the caller: an unavailable feed falls back to
/// whatever snapshot exists, however old, and then to an empty listing.
pub struct TenderService {
    source: Arc<dyn ReleaseSource>,
    store: Arc<dyn SnapshotStore>,
    clock: Arc<dyn Clock>,
    config: ServiceConfig,
}

impl TenderService {
    pub fn new(
        source: Arc<dyn ReleaseSource>,
        store: Arc<dyn SnapshotStore>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            source,
            store,
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Replace the wall clock, e.g. with a fixed one in tests.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Return the current tender list.
    ///
    /// Without `force_refresh`, a fresh snapshot is returned as is and the
    /// feed is not contacted.
    pub async fn get_tenders(&self, force_refresh: bool) -> TenderListing {
        let mut cached = None;
        if !force_refresh {
            cached = self.store.load();
            let now = self.clock.now();
            if let Some(snapshot) = cached.take_if(|s| is_fresh(s, now)) {
                debug!(
                    count = snapshot.tenders.len(),
                    captured_at = %snapshot.captured_at,
                    "serving cached tenders"
                );
                return snapshot.into();
            }
        }

        match self.source.fetch_releases().await {
            Ok(releases) => self.refresh(&releases),
            Err(e) => {
                warn!(error = %e, "release feed unavailable, falling back to cache");
                let fallback = if force_refresh { self.store.load() } else { cached };
                match fallback {
                    Some(snapshot) => {
                        info!(
                            captured_at = %snapshot.captured_at,
                            "serving cached tenders after fetch failure"
                        );
                        snapshot.into()
                    }
                    None => {
                        warn!("no cached tenders to fall back on");
                        TenderListing::empty()
                    }
                }
            }
        }
    }

    fn refresh(&self, releases: &[Value]) -> TenderListing {
        let tenders = collect_tenders(releases, &self.config.keyword, &self.config.notice_origin);
        let snapshot = Snapshot::new(tenders, self.clock.now());
        info!(
            releases = releases.len(),
            matched = snapshot.tenders.len(),
            keyword = %self.config.keyword,
            "refreshed tenders"
        );
        if let Err(e) = self.store.save(&snapshot) {
            error!(error = %e, "failed to persist tender snapshot");
        }
        snapshot.into()
    }
}
