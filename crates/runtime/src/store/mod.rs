//! Local expiring key-value store.
//!
//! The store is the offline half of persistence: game snapshots and
//! mini-game counters land here with a time-to-live, and expired or corrupt
//! entries read back as plain misses so the app can always fall back to a
//! fresh state.

mod file;
mod memory;
mod snapshot;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use snapshot::SnapshotService;

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed")]
    Io(#[from] std::io::Error),

    #[error("store entry serialization failed")]
    Serialize(#[from] serde_json::Error),

    #[error("store lock poisoned")]
    LockPoisoned,
}

/// Expiring key-value cache keyed by string.
///
/// Implementations are synchronous; all call sites either run on blocking
/// paths or tolerate the small writes a local cache performs.
pub trait CacheStore: Send + Sync {
    /// Reads a value. Expired and corrupt entries read as `None`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes a value with a time-to-live, replacing any previous entry.
    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Stored envelope: payload plus the expiry bookkeeping.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct CacheEntry {
    pub written_at_ms: i64,
    pub ttl_ms: i64,
    pub payload: String,
}

impl CacheEntry {
    pub fn new(payload: &str, ttl: Duration) -> Self {
        Self {
            written_at_ms: Utc::now().timestamp_millis(),
            ttl_ms: ttl.as_millis() as i64,
            payload: payload.to_owned(),
        }
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms.saturating_sub(self.written_at_ms) >= self.ttl_ms
    }
}
