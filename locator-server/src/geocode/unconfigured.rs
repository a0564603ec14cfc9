//! Placeholder backend for deployments without geocoding.

use futures::future::BoxFuture;

use super::AddressResolver;
use super::error::GeocodeError;
use crate::domain::{Coordinate, Datum};
use crate::suggest::{AddressSuggester, SuggestError};

/// Fails every address lookup with [`GeocodeError::NotConfigured`].
///
/// Coordinate queries keep working; address queries get a clear error
/// instead of a made-up location.
#[derive(Debug, Clone, Copy)]
pub struct UnconfiguredResolver {
    datum: Datum,
}

impl UnconfiguredResolver {
    /// `datum` should be the catalog's, so the startup datum check passes.
    pub fn new(datum: Datum) -> Self {
        Self { datum }
    }
}

impl AddressResolver for UnconfiguredResolver {
    fn datum(&self) -> Datum {
        self.datum
    }

    fn resolve<'a>(
        &'a self,
        address: &'a str,
    ) -> BoxFuture<'a, Result<Coordinate, GeocodeError>> {
        Box::pin(async move {
            if address.trim().is_empty() {
                Err(GeocodeError::EmptyAddress)
            } else {
                Err(GeocodeError::NotConfigured)
            }
        })
    }
}

impl AddressSuggester for UnconfiguredResolver {
    fn suggest<'a>(
        &'a self,
        _partial: &'a str,
    ) -> BoxFuture<'a, Result<Vec<String>, SuggestError>> {
        Box::pin(async { Err(SuggestError::NotConfigured) })
    }
}
