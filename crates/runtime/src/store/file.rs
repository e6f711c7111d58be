use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use tracing::warn;

use super::{CacheEntry, CacheStore, StoreError};

/// File-backed store: one JSON envelope per key under a base directory.
///
/// Keys may contain `:` namespacing; those characters are mapped to `-` for
/// the on-disk file name. A file that fails to parse is treated as a miss so
/// a damaged snapshot never wedges startup.
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect();
        self.base_dir.join(format!("{name}.json"))
    }
}

impl CacheStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key, error = %e, "discarding corrupt store entry");
                return Ok(None);
            }
        };
        if entry.is_expired(Utc::now().timestamp_millis()) {
            return Ok(None);
        }
        Ok(Some(entry.payload))
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError> {
        let entry = CacheEntry::new(value, ttl);
        let encoded = serde_json::to_string(&entry)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, encoded)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn round_trips_through_disk() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        store
            .set("app:game_state", r#"{"coins":5}"#, Duration::from_secs(60))
            .unwrap();
        assert_eq!(
            store.get("app:game_state").unwrap().as_deref(),
            Some(r#"{"coins":5}"#)
        );
    }

    #[test]
    fn corrupt_file_reads_as_miss() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        store.set("k", "v", Duration::from_secs(60)).unwrap();
        fs::write(store.path_for("k"), "not json at all").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn missing_key_is_a_miss_not_an_error() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        assert_eq!(store.get("nothing").unwrap(), None);
        store.remove("nothing").unwrap();
    }
}
