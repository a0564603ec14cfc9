//! Resolver error types.

use crate::domain::InvalidCoordinate;
use crate::geocode::GeocodeError;

/// Errors surfaced by the resolver operations.
///
/// There is no partial result: an operation returns either the full ranked
/// sequence or one of these.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolveError {
    /// Query location outside the valid latitude/longitude domain
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinate),

    /// The address could not be turned into coordinates
    #[error("geocoding failed: {0}")]
    GeocodeFailed(#[from] GeocodeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;

    #[test]
    fn error_display() {
        let err: ResolveError = Coordinate::new(95.0, 0.0).unwrap_err().into();
        assert_eq!(
            err.to_string(),
            "invalid coordinate (95, 0): latitude must be within [-90, 90]"
        );

        let err: ResolveError = GeocodeError::EmptyAddress.into();
        assert_eq!(err.to_string(), "geocoding failed: address must not be empty");
    }
}
