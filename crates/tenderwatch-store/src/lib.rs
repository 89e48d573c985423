//! Snapshot cache: the freshness rule plus file-backed and in-memory stores.

mod error;
pub use error::StoreError;

mod cache;
pub use cache::{SNAPSHOT_TTL, SnapshotStore, is_fresh};

mod json;
pub use json::JsonFileStore;

mod memory;
pub use memory::MemoryStore;
