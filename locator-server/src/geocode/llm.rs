//! LLM-backed geocoder.

use futures::future::BoxFuture;
use serde::Deserialize;
use tracing::{debug, warn};

use super::error::GeocodeError;
use super::AddressResolver;
use crate::domain::{Coordinate, Datum};
use crate::llm::LlmClient;

/// The only reply shape accepted from the model.
///
/// Anything else, including extra keys, is a malformed reply.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GeocodeReply {
    found: bool,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
}

/// Geocodes addresses by prompting a chat-completions model.
#[derive(Debug, Clone)]
pub struct LlmGeocoder {
    client: LlmClient,
    datum: Datum,
    system_prompt: String,
}

impl LlmGeocoder {
    /// Create a geocoder asking for coordinates in `datum`.
    pub fn new(client: LlmClient, datum: Datum) -> Self {
        Self {
            client,
            datum,
            system_prompt: system_prompt(datum),
        }
    }

    async fn lookup(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodeError::EmptyAddress);
        }

        let content = self
            .client
            .complete_json(&self.system_prompt, address)
            .await
            .map_err(|e| {
                warn!(error = %e, "geocoding request failed");
                GeocodeError::from(e)
            })?;

        let location = parse_geocode_reply(address, &content)?;
        debug!(%address, %location, "geocoded address");
        Ok(location)
    }
}

impl AddressResolver for LlmGeocoder {
    fn datum(&self) -> Datum {
        self.datum
    }

    fn resolve<'a>(
        &'a self,
        address: &'a str,
    ) -> BoxFuture<'a, Result<Coordinate, GeocodeError>> {
        Box::pin(self.lookup(address))
    }
}

fn system_prompt(datum: Datum) -> String {
    let system = match datum {
        Datum::Wgs84 => "WGS84 (GPS)",
        Datum::Gcj02 => "GCJ-02 (the system used by maps of mainland China)",
    };

    format!(
        "You are a geocoding service. The user message is a postal address. \
         Reply with a single JSON object and nothing else. \
         If you can locate the address, reply \
         {{\"found\": true, \"latitude\": <number>, \"longitude\": <number>}} \
         using decimal degrees in the {system} coordinate system. \
         If you cannot locate it, reply {{\"found\": false}}. \
         Do not add any other keys."
    )
}

/// Validate the model's reply text against the geocode schema.
///
/// Schema violations and out-of-range coordinates are
/// [`GeocodeError::Malformed`]; an explicit "not found" is
/// [`GeocodeError::NotFound`].
pub fn parse_geocode_reply(address: &str, content: &str) -> Result<Coordinate, GeocodeError> {
    let reply: GeocodeReply =
        serde_json::from_str(content.trim()).map_err(|e| GeocodeError::Malformed {
            message: e.to_string(),
        })?;

    match reply {
        GeocodeReply {
            found: false,
            latitude: None,
            longitude: None,
        } => Err(GeocodeError::NotFound {
            address: address.to_string(),
        }),
        GeocodeReply {
            found: true,
            latitude: Some(latitude),
            longitude: Some(longitude),
        } => Coordinate::new(latitude, longitude).map_err(|e| GeocodeError::Malformed {
            message: e.to_string(),
        }),
        GeocodeReply { found: true, .. } => Err(GeocodeError::Malformed {
            message: "found=true requires both latitude and longitude".to_string(),
        }),
        GeocodeReply { found: false, .. } => Err(GeocodeError::Malformed {
            message: "found=false must not carry coordinates".to_string(),
        }),
    }
}
