//! Durable snapshot storage.
//!
//! Snapshots are raw JSON values keyed by collection name. The store
//! is deliberately dumb: it neither inspects payloads nor tracks their
//! age. The cache layer decides what to persist and when.
//!
//! `FileStore` is the real implementation (one JSON file per key under
//! the cache directory). `MemoryStore` backs tests.

pub mod file;
pub mod memory;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Key/value persistence for cache snapshots.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the snapshot for `key`, or `None` when nothing is stored.
    async fn load(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Persist the snapshot for `key`, replacing any previous value.
    async fn save(&self, key: &str, value: &Value) -> Result<(), StoreError>;

    /// Drop the snapshot for `key`. Missing keys are not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Drop every snapshot.
    async fn clear(&self) -> Result<(), StoreError>;
}
