//! Data models for storefront entities.
//!
//! This module contains all the data structures exchanged with the shop
//! backend and cached locally:
//!
//! - `Product`, `Category`, `Brand`: catalog records
//! - `Order`, `Quote`, `Coupon`: commerce records
//! - `Page`, `BlogPost`, `ContactMessage`: content records
//! - `StoreSettings`: the singleton settings record
//!
//! Wire names are camelCase to match the backend's JSON.

pub mod catalog;
pub mod commerce;
pub mod content;
pub mod settings;

pub use catalog::{Brand, Category, Product};
pub use commerce::{
    Coupon, DiscountKind, Order, OrderCustomer, OrderDraft, OrderItem, OrderStatus, Quote,
};
pub use content::{BlogPost, ContactMessage, Page};
pub use settings::StoreSettings;

/// Implemented by every record addressed by a unique string identifier.
///
/// The identifier is the upsert key: saving a record with an id already
/// present in a collection replaces that record. Identifiers are assigned
/// by the caller (typically `utils::timestamp_id`), never by the cache.
pub trait Entity {
    fn id(&self) -> &str;
}
