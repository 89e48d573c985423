use chrono::{DateTime, Duration, Utc};
use tenderwatch_core::Snapshot;

use crate::StoreError;

/// How long a snapshot is served before a refresh is attempted.
pub const SNAPSHOT_TTL: Duration = Duration::hours(1);

/// Single-slot storage for the most recent successful refresh.
///
/// `load` never fails: a missing or unreadable snapshot is reported as
/// `None` so the caller can carry on with a live fetch. `save` replaces the
/// stored snapshot wholesale; callers decide what to do with a failure.
pub trait SnapshotStore: Send + Sync {
    fn load(&self) -> Option<Snapshot>;

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError>;
}

/// A snapshot is fresh while strictly less than [`SNAPSHOT_TTL`] old.
pub fn is_fresh(snapshot: &Snapshot, now: DateTime<Utc>) -> bool {
    now - snapshot.captured_at < SNAPSHOT_TTL
}
