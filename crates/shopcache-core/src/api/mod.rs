//! Remote API access for the storefront backend.
//!
//! Everything the crate says to the network goes through the `Transport`
//! trait defined here. The `HttpTransport` implementation talks JSON to
//! the storefront REST API with a fixed request timeout and swallows
//! failures into "no result" so cache code never has to handle a
//! transport error mid-flight.

pub mod error;
pub mod transport;

pub use error::ApiError;
pub use transport::{HttpTransport, Method, Transport};
