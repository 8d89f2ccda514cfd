use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;

use super::{SnapshotStore, StoreError};

/// Snapshot store writing one pretty-printed JSON file per key.
///
/// Files are small (a collection per file), so reads and writes stay
/// synchronous; nothing here is worth a spawn_blocking round trip.
pub struct FileStore {
    cache_dir: PathBuf,
}

impl FileStore {
    pub fn new(cache_dir: PathBuf) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    fn snapshot_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl SnapshotStore for FileStore {
    async fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let path = self.snapshot_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)?;
        let value: Value = serde_json::from_str(&contents)?;
        Ok(Some(value))
    }

    async fn save(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let path = self.snapshot_path(key);
        let contents = serde_json::to_string_pretty(value)?;
        std::fs::write(&path, contents)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.snapshot_path(key);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        for entry in std::fs::read_dir(&self.cache_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                std::fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}
