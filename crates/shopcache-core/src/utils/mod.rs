//! Utility functions for identifiers, slugs and money rounding.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{round_cents, slugify, timestamp_id};
