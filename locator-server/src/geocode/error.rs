//! Address resolution error types.

use crate::llm::LlmError;

/// Reasons an address could not be turned into coordinates.
///
/// Every variant is a "geocode failed" condition, distinct from a bad
/// coordinate, so callers can say "address not found" rather than "bad
/// input".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeocodeError {
    /// Blank address supplied
    #[error("address must not be empty")]
    EmptyAddress,

    /// Backend answered, but could not locate the address
    #[error("address not found: {address}")]
    NotFound { address: String },

    /// Backend could not be reached or refused the request
    #[error("geocoding service unavailable: {message}")]
    Unavailable { message: String },

    /// Backend reply did not match the expected schema
    #[error("malformed geocoding response: {message}")]
    Malformed { message: String },

    /// No backend configured
    #[error("no geocoding backend configured")]
    NotConfigured,
}

impl GeocodeError {
    /// Whether the failure is about the address itself rather than the backend.
    pub fn is_address_problem(&self) -> bool {
        matches!(self, GeocodeError::EmptyAddress | GeocodeError::NotFound { .. })
    }
}

impl From<LlmError> for GeocodeError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Json { .. } | LlmError::EmptyReply => GeocodeError::Malformed {
                message: err.to_string(),
            },
            _ => GeocodeError::Unavailable {
                message: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GeocodeError::NotFound {
            address: "1 Nowhere Lane".into(),
        };
        assert_eq!(err.to_string(), "address not found: 1 Nowhere Lane");

        let err = GeocodeError::Malformed {
            message: "missing field `latitude`".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed geocoding response: missing field `latitude`"
        );

        assert_eq!(
            GeocodeError::NotConfigured.to_string(),
            "no geocoding backend configured"
        );
    }

    #[test]
    fn llm_errors_map_to_geocode_failures() {
        let err: GeocodeError = LlmError::EmptyReply.into();
        assert!(matches!(err, GeocodeError::Malformed { .. }));

        let err: GeocodeError = LlmError::RateLimited.into();
        assert!(matches!(err, GeocodeError::Unavailable { .. }));

        let err: GeocodeError = LlmError::Api {
            status: 500,
            message: "boom".into(),
        }
        .into();
        assert!(matches!(err, GeocodeError::Unavailable { .. }));
    }

    #[test]
    fn address_problems() {
        assert!(GeocodeError::EmptyAddress.is_address_problem());
        assert!(
            GeocodeError::NotFound {
                address: "x".into()
            }
            .is_address_problem()
        );
        assert!(!GeocodeError::NotConfigured.is_address_problem());
    }
}
