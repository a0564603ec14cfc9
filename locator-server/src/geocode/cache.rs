//! In-memory cache for address lookups.
//!
//! Geocoding through a model is slow and billed per call, and users repeat
//! addresses. Only successful lookups are cached; failures always go back
//! to the backend.

use std::time::Duration;

use futures::future::BoxFuture;
use moka::future::Cache as MokaCache;
use tracing::debug;

use super::error::GeocodeError;
use super::{AddressResolver, normalize_address};
use crate::domain::{Coordinate, Datum};

/// Configuration for the geocode cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeCacheConfig {
    /// TTL for cached entries. Zero disables caching.
    pub ttl: Duration,

    /// Maximum number of cached addresses.
    pub max_capacity: u64,
}

impl GeocodeCacheConfig {
    /// Whether this config actually caches anything.
    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero() && self.max_capacity > 0
    }
}

impl Default for GeocodeCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 1000,
        }
    }
}

/// Address resolver with caching.
///
/// Wraps any `AddressResolver` and remembers successful lookups, keyed by
/// the normalized address.
pub struct CachedResolver<R> {
    inner: R,
    cache: MokaCache<String, Coordinate>,
}

impl<R: AddressResolver> CachedResolver<R> {
    /// Create a new cached resolver.
    pub fn new(inner: R, config: &GeocodeCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, cache }
    }

    /// Number of cached addresses (approximate; for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Drop every cached address.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    async fn lookup(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        let key = normalize_address(address);
        if key.is_empty() {
            return Err(GeocodeError::EmptyAddress);
        }

        if let Some(cached) = self.cache.get(&key).await {
            debug!(address = %key, "geocode cache hit");
            return Ok(cached);
        }

        let location = self.inner.resolve(address).await?;
        self.cache.insert(key, location).await;
        Ok(location)
    }
}

impl<R: AddressResolver> AddressResolver for CachedResolver<R> {
    fn datum(&self) -> Datum {
        self.inner.datum()
    }

    fn resolve<'a>(
        &'a self,
        address: &'a str,
    ) -> BoxFuture<'a, Result<Coordinate, GeocodeError>> {
        Box::pin(self.lookup(address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Resolver that counts calls and knows one address.
    struct Counting {
        calls: Arc<AtomicUsize>,
    }

    impl AddressResolver for Counting {
        fn datum(&self) -> Datum {
            Datum::Gcj02
        }

        fn resolve<'a>(
            &'a self,
            address: &'a str,
        ) -> BoxFuture<'a, Result<Coordinate, GeocodeError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move {
                if normalize_address(address) == "known" {
                    Ok(Coordinate::new(30.6, 114.2).unwrap())
                } else {
                    Err(GeocodeError::NotFound {
                        address: address.to_string(),
                    })
                }
            })
        }
    }

    fn cached() -> (CachedResolver<Counting>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let inner = Counting {
            calls: calls.clone(),
        };
        (
            CachedResolver::new(inner, &GeocodeCacheConfig::default()),
            calls,
        )
    }

    #[test]
    fn default_config() {
        let config = GeocodeCacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(300));
        assert_eq!(config.max_capacity, 1000);
        assert!(config.is_enabled());

        let off = GeocodeCacheConfig {
            ttl: Duration::ZERO,
            ..config
        };
        assert!(!off.is_enabled());
    }

    #[tokio::test]
    async fn second_lookup_hits_cache() {
        let (resolver, calls) = cached();

        let first = resolver.resolve("known").await.unwrap();
        let second = resolver.resolve("  KNOWN ").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let (resolver, calls) = cached();

        assert!(resolver.resolve("unknown").await.is_err());
        assert!(resolver.resolve("unknown").await.is_err());

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn blank_address_skips_backend() {
        let (resolver, calls) = cached();
        assert_eq!(
            resolver.resolve("  ").await,
            Err(GeocodeError::EmptyAddress)
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let (resolver, calls) = cached();

        resolver.resolve("known").await.unwrap();
        resolver.invalidate_all();
        resolver.resolve("known").await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn datum_passes_through() {
        let (resolver, _) = cached();
        assert_eq!(resolver.datum(), Datum::Gcj02);
    }
}
