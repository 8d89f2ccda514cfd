//! Read-through cache over the storefront API.
//!
//! This module provides the `CacheService`: every read is answered from
//! a local snapshot (memory first, then the persistent store, then a
//! caller-supplied fallback) while a detached refresh fetches the
//! authoritative copy for next time. Writes land in the local snapshot
//! synchronously and are pushed to the remote API in the background.
//!
//! Nothing here ever waits on the network to answer a caller.

pub mod service;

pub use service::{
    CacheService, Collection, RefreshOutcome, RefreshTask, SyncOutcome, SyncTask, WriteStyle,
};
