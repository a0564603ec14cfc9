//! Address-based resolution: geocode, then rank.

use tracing::debug;

use super::error::ResolveError;
use super::rank::{RankedStation, Selection, rank};
use crate::catalog::Catalog;
use crate::domain::Coordinate;
use crate::geocode::{AddressResolver, GeocodeError};

/// Outcome of resolving an address: where it is, and what is near it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAddress<'a> {
    pub location: Coordinate,
    pub stations: Vec<RankedStation<'a>>,
}

/// Geocode `address`, then rank the catalog against the result.
///
/// A geocoding failure is returned as-is; no fallback location is ever
/// substituted, and ranking never runs without a location.
pub async fn resolve_nearest_by_address<'c, R>(
    resolver: &R,
    catalog: &'c Catalog,
    address: &str,
    selection: Selection,
) -> Result<ResolvedAddress<'c>, ResolveError>
where
    R: AddressResolver + ?Sized,
{
    let address = address.trim();
    if address.is_empty() {
        return Err(GeocodeError::EmptyAddress.into());
    }

    let location = resolver.resolve(address).await?;
    debug!(%address, %location, "address resolved");

    Ok(ResolvedAddress {
        location,
        stations: rank(location, catalog, selection),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Datum;
    use crate::geocode::{AddressEntry, StaticResolver, UnconfiguredResolver};

    fn table() -> StaticResolver {
        StaticResolver::from_entries(
            Datum::Gcj02,
            vec![AddressEntry {
                address: "湖北省武汉市江汉区发展大道185号".to_string(),
                latitude: 30.6080,
                longitude: 114.2650,
            }],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn resolves_and_ranks() {
        let catalog = Catalog::builtin();
        let result = resolve_nearest_by_address(
            &table(),
            &catalog,
            "湖北省武汉市江汉区发展大道185号",
            Selection::top(3).unwrap(),
        )
        .await
        .unwrap();

        assert_eq!(result.location.latitude(), 30.6080);
        assert_eq!(result.stations.len(), 3);
        assert_eq!(result.stations[0].station.name, "美团配送(汉口火车站)");
        assert!(result.stations[0].distance_km < 1e-9);
    }

    #[tokio::test]
    async fn geocode_failure_propagates() {
        let catalog = Catalog::builtin();
        let err = resolve_nearest_by_address(&table(), &catalog, "nowhere", Selection::All)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ResolveError::GeocodeFailed(GeocodeError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn blank_address_never_reaches_backend() {
        let catalog = Catalog::builtin();
        let resolver = UnconfiguredResolver::new(Datum::Gcj02);
        let err = resolve_nearest_by_address(&resolver, &catalog, "   ", Selection::All)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ResolveError::GeocodeFailed(GeocodeError::EmptyAddress)
        ));
    }

    #[tokio::test]
    async fn unconfigured_backend_is_a_geocode_failure() {
        let catalog = Catalog::builtin();
        let resolver = UnconfiguredResolver::new(Datum::Gcj02);
        let err = resolve_nearest_by_address(&resolver, &catalog, "1 Main St", Selection::All)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ResolveError::GeocodeFailed(GeocodeError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn works_through_trait_object() {
        let catalog = Catalog::empty(Datum::Gcj02);
        let resolver: Box<dyn AddressResolver> = Box::new(table());
        let result = resolve_nearest_by_address(
            resolver.as_ref(),
            &catalog,
            "湖北省武汉市江汉区发展大道185号",
            Selection::All,
        )
        .await
        .unwrap();

        assert!(result.stations.is_empty());
    }
}
