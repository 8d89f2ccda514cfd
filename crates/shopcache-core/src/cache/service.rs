use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::api::{Method, Transport};
use crate::models::Entity;
use crate::store::{SnapshotStore, StoreError};

/// A cached collection: its snapshot key, its remote path, and how
/// upserts reach the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collection {
    pub key: &'static str,
    pub path: &'static str,
    pub write: WriteStyle,
}

/// How a collection's upserts are sent remotely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStyle {
    /// Existing records go to `PUT <path>/<id>`, new ones to `POST <path>`.
    PutById,
    /// Every upsert goes to `POST <path>`; the server reconciles by id.
    PostCollection,
}

/// What a background refresh did with the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A fresh payload replaced the snapshot.
    Applied,
    /// The snapshot was left alone: no response, an empty payload, or a
    /// payload of the wrong shape.
    Discarded,
}

/// What a background remote write came back with.
///
/// `Dropped` only means no parsed response arrived; the write may still
/// have landed server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Acknowledged,
    Dropped,
}

/// Handle to a detached background refresh. Dropping it does not cancel
/// the refresh; callers that care about the outcome can `wait` on it.
pub struct RefreshTask {
    handle: JoinHandle<RefreshOutcome>,
}

impl RefreshTask {
    pub async fn wait(self) -> RefreshOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(err) => {
                debug!(error = %err, "refresh task aborted");
                RefreshOutcome::Discarded
            }
        }
    }
}

/// Handle to a detached remote write. Dropping it does not cancel the
/// request.
pub struct SyncTask {
    handle: Option<JoinHandle<SyncOutcome>>,
}

impl SyncTask {
    fn spawned(handle: JoinHandle<SyncOutcome>) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    /// A sync that never dispatched anything.
    fn dropped() -> Self {
        Self { handle: None }
    }

    pub async fn wait(self) -> SyncOutcome {
        match self.handle {
            Some(handle) => match handle.await {
                Ok(outcome) => outcome,
                Err(err) => {
                    debug!(error = %err, "sync task aborted");
                    SyncOutcome::Dropped
                }
            },
            None => SyncOutcome::Dropped,
        }
    }
}

/// Which payload shapes a refresh may apply. Anything else, including
/// an empty list or empty object, is discarded so a backend blip never
/// wipes local data. The flip side: once a collection has cached
/// something, a genuinely emptied server collection is never observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PayloadShape {
    List,
    Singleton,
}

impl PayloadShape {
    fn accepts(self, value: &Value) -> bool {
        match self {
            PayloadShape::List => value.as_array().is_some_and(|items| !items.is_empty()),
            PayloadShape::Singleton => value.as_object().is_some_and(|fields| !fields.is_empty()),
        }
    }
}

/// Read-through cache over the storefront API.
///
/// Three planes, consulted in order: an in-process snapshot map, the
/// persistent store, and a caller-supplied fallback. The remote API is
/// only ever touched by detached background tasks, so no read or write
/// blocks its caller on the network.
///
/// The consistency model is best effort and last-write-wins. Two
/// callers that each read, modify, and write back the same record do
/// not get merged; the later write replaces the record wholesale, both
/// locally and (eventually) remotely.
///
/// Clone is cheap and shares all state.
#[derive(Clone)]
pub struct CacheService {
    snapshots: Arc<Mutex<HashMap<String, Value>>>,
    store: Arc<dyn SnapshotStore>,
    transport: Arc<dyn Transport>,
}

impl CacheService {
    pub fn new(store: Arc<dyn SnapshotStore>, transport: Arc<dyn Transport>) -> Self {
        Self {
            snapshots: Arc::new(Mutex::new(HashMap::new())),
            store,
            transport,
        }
    }

    // ===== Reads =====

    /// Read a list collection.
    ///
    /// Returns immediately from the snapshot, or `fallback` when the
    /// collection has never been cached. The fallback is returned as
    /// is, never written into the cache. Every call also spawns its own
    /// background refresh; concurrent identical reads are not collapsed
    /// into one request.
    pub async fn read_list<T>(
        &self,
        collection: Collection,
        fallback: Vec<T>,
    ) -> (Vec<T>, RefreshTask)
    where
        T: DeserializeOwned,
    {
        let snapshot = self.snapshot(collection.key).await;
        let refresh = self.spawn_refresh(collection.key, collection.path, PayloadShape::List);

        let items = snapshot
            .and_then(|value| match serde_json::from_value(value) {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    warn!(
                        collection = collection.key,
                        error = %err,
                        "snapshot does not match the expected shape, using fallback"
                    );
                    None
                }
            })
            .unwrap_or(fallback);
        (items, refresh)
    }

    /// Read a singleton resource. Same tiers and refresh behavior as
    /// `read_list`, but the snapshot is a single object.
    pub async fn read_one<T>(
        &self,
        key: &'static str,
        path: &'static str,
        fallback: T,
    ) -> (T, RefreshTask)
    where
        T: DeserializeOwned,
    {
        let snapshot = self.snapshot(key).await;
        let refresh = self.spawn_refresh(key, path, PayloadShape::Singleton);

        let value = snapshot
            .and_then(|value| match serde_json::from_value(value) {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    warn!(
                        key,
                        error = %err,
                        "snapshot does not match the expected shape, using fallback"
                    );
                    None
                }
            })
            .unwrap_or(fallback);
        (value, refresh)
    }

    // ===== Writes =====

    /// Upsert one record into a collection.
    ///
    /// The record replaces any snapshot entry with the same id and is
    /// persisted to memory and the store before this returns. The
    /// matching remote write is dispatched as a detached task; its
    /// failure is never surfaced here, the local snapshot stands either
    /// way. For `PutById` collections an id already present in the
    /// snapshot updates via `PUT <path>/<id>`, anything else creates
    /// via `POST <path>`.
    pub async fn upsert<T>(&self, collection: Collection, entity: &T) -> SyncTask
    where
        T: Entity + Serialize,
    {
        let record = match serde_json::to_value(entity) {
            Ok(value) => value,
            Err(err) => {
                error!(
                    collection = collection.key,
                    error = %err,
                    "record failed to serialize, skipping write"
                );
                return SyncTask::dropped();
            }
        };
        let id = entity.id().to_string();
        let existed = self.splice(collection.key, &id, Some(record.clone())).await;

        let (method, path) = match collection.write {
            WriteStyle::PutById if existed => (Method::Put, format!("{}/{}", collection.path, id)),
            _ => (Method::Post, collection.path.to_string()),
        };
        self.spawn_sync(collection.key, method, path, Some(record))
    }

    /// Upsert into the local snapshot only; nothing is sent remotely.
    pub async fn upsert_local<T>(&self, collection: Collection, entity: &T)
    where
        T: Entity + Serialize,
    {
        match serde_json::to_value(entity) {
            Ok(record) => {
                self.splice(collection.key, entity.id(), Some(record)).await;
            }
            Err(err) => {
                error!(
                    collection = collection.key,
                    error = %err,
                    "record failed to serialize, skipping local write"
                );
            }
        }
    }

    /// Drop the record with `id` from the snapshot and dispatch the
    /// remote delete. Removing an id that is not cached still persists
    /// the (unchanged) snapshot and still dispatches the delete.
    pub async fn remove(&self, collection: Collection, id: &str) -> SyncTask {
        self.splice(collection.key, id, None).await;
        let path = format!("{}/{}", collection.path, id);
        self.spawn_sync(collection.key, Method::Delete, path, None)
    }

    /// Replace a singleton resource locally and POST it remotely.
    pub async fn write_one<T>(&self, key: &'static str, path: &'static str, value: &T) -> SyncTask
    where
        T: Serialize,
    {
        let payload = match serde_json::to_value(value) {
            Ok(payload) => payload,
            Err(err) => {
                error!(key, error = %err, "value failed to serialize, skipping write");
                return SyncTask::dropped();
            }
        };
        self.apply(key, payload.clone()).await;
        self.spawn_sync(key, Method::Post, path.to_string(), Some(payload))
    }

    /// Wipe the in-process map and the persistent store.
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.snapshots.lock().await.clear();
        self.store.clear().await
    }

    // ===== Internals =====

    /// Current snapshot for `key`: memory first, then the store (which
    /// seeds memory on a hit). No fallback, no refresh, no network.
    async fn snapshot(&self, key: &str) -> Option<Value> {
        if let Some(value) = self.snapshots.lock().await.get(key).cloned() {
            return Some(value);
        }
        match self.store.load(key).await {
            Ok(Some(value)) => {
                // A write can land while the load is in flight; the map
                // entry is then newer than the store copy and wins.
                let mut snapshots = self.snapshots.lock().await;
                Some(snapshots.entry(key.to_string()).or_insert(value).clone())
            }
            Ok(None) => None,
            Err(err) => {
                warn!(key = %key, error = %err, "failed to load snapshot from store");
                None
            }
        }
    }

    /// Write `payload` as the snapshot for `key`, memory first. A store
    /// failure is logged and the in-memory copy kept.
    async fn apply(&self, key: &str, payload: Value) {
        self.snapshots
            .lock()
            .await
            .insert(key.to_string(), payload.clone());
        if let Err(err) = self.store.save(key, &payload).await {
            warn!(key = %key, error = %err, "failed to persist snapshot, keeping it in memory");
        }
    }

    /// Remove any snapshot record matching `id`, then append `record`
    /// if one is given, and persist the result. Reports whether the id
    /// was present. A missing or non-list snapshot starts from empty.
    async fn splice(&self, key: &str, id: &str, record: Option<Value>) -> bool {
        let mut items = match self.snapshot(key).await {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };
        let before = items.len();
        items.retain(|item| item.get("id").and_then(Value::as_str) != Some(id));
        let existed = items.len() < before;
        if let Some(record) = record {
            items.push(record);
        }
        self.apply(key, Value::Array(items)).await;
        existed
    }

    fn spawn_refresh(&self, key: &str, path: &str, shape: PayloadShape) -> RefreshTask {
        let service = self.clone();
        let key = key.to_string();
        let path = path.to_string();
        let handle = tokio::spawn(async move {
            let Some(payload) = service.transport.call(Method::Get, &path, None).await else {
                debug!(key = %key, "refresh produced no result, keeping snapshot");
                return RefreshOutcome::Discarded;
            };
            if !shape.accepts(&payload) {
                debug!(key = %key, "refresh payload empty or malformed, keeping snapshot");
                return RefreshOutcome::Discarded;
            }
            service.apply(&key, payload).await;
            debug!(key = %key, "refresh applied");
            RefreshOutcome::Applied
        });
        RefreshTask { handle }
    }

    fn spawn_sync(&self, key: &str, method: Method, path: String, body: Option<Value>) -> SyncTask {
        let transport = Arc::clone(&self.transport);
        let key = key.to_string();
        let handle = tokio::spawn(async move {
            match transport.call(method, &path, body).await {
                Some(_) => SyncOutcome::Acknowledged,
                None => {
                    debug!(key = %key, %method, path = %path, "remote write was not acknowledged");
                    SyncOutcome::Dropped
                }
            }
        });
        SyncTask::spawned(handle)
    }
}
