use std::sync::Arc;
use std::time::Duration;

use pet_core::GameState;
use tracing::warn;

use super::{CacheStore, StoreError};

/// Key the whole game state snapshots under.
const SNAPSHOT_KEY: &str = "app:game_state";

/// Persists and restores full [`GameState`] snapshots through a cache store.
///
/// Saving happens after every committed action; loading happens once at
/// startup. A snapshot that expired or fails to decode restores as `None`
/// and the runtime starts from defaults.
pub struct SnapshotService {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl SnapshotService {
    pub fn new(store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn save(&self, state: &GameState) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(state)?;
        self.store.set(SNAPSHOT_KEY, &encoded, self.ttl)
    }

    pub fn load(&self) -> Result<Option<GameState>, StoreError> {
        let Some(raw) = self.store.get(SNAPSHOT_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                warn!(error = %e, "snapshot failed to decode, starting fresh");
                Ok(None)
            }
        }
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(SNAPSHOT_KEY)
    }
}
