//! Core library for shopcache: an offline-first data layer for a small
//! e-commerce storefront and its back office.
//!
//! Reads are answered from a local snapshot (in-process memory, then a
//! JSON file store, then compiled-in seed data) while a detached
//! background refresh fetches the authoritative copy from the
//! storefront REST API for next time. Writes apply to the local
//! snapshot synchronously and sync remotely in the background.
//!
//! The consistency model is deliberately best effort: last write wins,
//! no retries, no conflict resolution. Stale data beats no data.

pub mod api;
pub mod cache;
pub mod config;
pub mod data;
pub mod models;
pub mod seed;
pub mod store;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::{CacheService, RefreshOutcome, RefreshTask, SyncOutcome, SyncTask};
pub use config::Config;
pub use data::ShopData;
