//! Address resolution.
//!
//! The resolver only needs one thing from a geocoding backend: turn an
//! address into a coordinate in the catalog's datum, or fail. Backends:
//!
//! - [`LlmGeocoder`] asks a chat-completions model and validates its JSON
//! - [`StaticResolver`] looks addresses up in a fixed table
//! - [`UnconfiguredResolver`] always fails, for deployments without a backend
//!
//! [`CachedResolver`] can wrap any of them.

mod cache;
mod error;
mod llm;
mod table;
mod unconfigured;

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::domain::{Coordinate, Datum};

pub use cache::{CachedResolver, GeocodeCacheConfig};
pub use error::GeocodeError;
pub use llm::{LlmGeocoder, parse_geocode_reply};
pub use table::{AddressEntry, AddressTableFile, StaticResolver, TableError};
pub use unconfigured::UnconfiguredResolver;

/// A backend that converts free-text addresses into coordinates.
pub trait AddressResolver: Send + Sync {
    /// Datum of the coordinates this backend returns.
    fn datum(&self) -> Datum;

    /// Resolve a non-empty address.
    ///
    /// There is no partial result: either a validated coordinate or an error.
    fn resolve<'a>(
        &'a self,
        address: &'a str,
    ) -> BoxFuture<'a, Result<Coordinate, GeocodeError>>;
}

impl<T: AddressResolver + ?Sized> AddressResolver for Arc<T> {
    fn datum(&self) -> Datum {
        (**self).datum()
    }

    fn resolve<'a>(
        &'a self,
        address: &'a str,
    ) -> BoxFuture<'a, Result<Coordinate, GeocodeError>> {
        (**self).resolve(address)
    }
}

/// Canonical form of an address for lookups and cache keys.
///
/// Trims, collapses internal whitespace, and lowercases.
pub fn normalize_address(address: &str) -> String {
    address
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
