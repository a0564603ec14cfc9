//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, Datum, Station, StationId};
use crate::resolver::RankedStation;

/// Request to rank stations around a coordinate.
#[derive(Debug, Deserialize)]
pub struct NearestRequest {
    /// Latitude in decimal degrees
    pub lat: f64,

    /// Longitude in decimal degrees
    pub lon: f64,

    /// Return at most this many stations
    pub k: Option<usize>,

    /// Return every station, nearest first
    pub all: Option<bool>,
}

/// Request to rank stations around an address.
#[derive(Debug, Deserialize)]
pub struct AddressRequest {
    /// Free-text address
    pub address: String,

    /// Return at most this many stations
    pub k: Option<usize>,

    /// Return every station, nearest first
    pub all: Option<bool>,
}

/// Request for address suggestions.
#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    /// Partial address typed so far
    #[serde(default)]
    pub q: String,
}

/// A station as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct StationResult {
    /// Catalog index
    pub id: usize,

    pub name: String,

    pub address: String,

    /// Contact number, or the "unknown" sentinel
    pub phone_number: String,

    pub latitude: f64,

    pub longitude: f64,
}

impl StationResult {
    /// Create from a catalog entry.
    pub fn from_station(id: StationId, station: &Station) -> Self {
        Self {
            id: id.0,
            name: station.name.clone(),
            address: station.address.clone(),
            phone_number: station.phone_number.clone(),
            latitude: station.location.latitude(),
            longitude: station.location.longitude(),
        }
    }
}

/// A station with its distance from the query.
#[derive(Debug, Clone, Serialize)]
pub struct RankedStationResult {
    #[serde(flatten)]
    pub station: StationResult,

    /// Great-circle distance in kilometres
    pub distance_km: f64,

    /// Distance for display, e.g. "2.34 km"
    pub distance_label: String,
}

impl RankedStationResult {
    /// Create from a ranked station.
    pub fn from_ranked(ranked: &RankedStation<'_>) -> Self {
        Self {
            station: StationResult::from_station(ranked.id, ranked.station),
            distance_km: ranked.distance_km,
            distance_label: ranked.distance_label(),
        }
    }
}

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LocationResult {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Coordinate> for LocationResult {
    fn from(c: Coordinate) -> Self {
        Self {
            latitude: c.latitude(),
            longitude: c.longitude(),
        }
    }
}

/// Response for nearest-station queries.
#[derive(Debug, Serialize)]
pub struct NearestResponse {
    /// The point stations were ranked against
    pub query: LocationResult,

    /// Datum of all coordinates in this response
    pub datum: Datum,

    /// Stations, nearest first
    pub stations: Vec<RankedStationResult>,
}

/// Response listing the whole catalog.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub datum: Datum,
    pub stations: Vec<StationResult>,
}

/// Response for address suggestions.
#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error kind, e.g. "geocode_failed"
    pub error: &'static str,

    /// Human-readable message
    pub message: String,
}
