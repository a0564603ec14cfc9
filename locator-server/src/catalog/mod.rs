//! Station catalog.
//!
//! The catalog is loaded once at startup, either from a JSON file or from
//! the built-in list, and is never mutated afterwards. Lookups borrow it;
//! sharing it between requests needs nothing more than an `Arc`.

mod builtin;
mod error;
mod loader;

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, Datum, Station, StationId, UNKNOWN_PHONE};

pub use error::CatalogError;
pub use loader::{CatalogFile, load_catalog, parse_catalog};

/// One station as it appears in configuration, before validation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationRecord {
    pub name: String,
    pub address: String,
    #[serde(default = "unknown_phone")]
    pub phone_number: String,
    pub latitude: f64,
    pub longitude: f64,
}

fn unknown_phone() -> String {
    UNKNOWN_PHONE.to_string()
}

/// Immutable, ordered collection of stations.
///
/// Order is significant: it is the tie-break order when two stations are
/// equally far from a query.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    datum: Datum,
    stations: Vec<Station>,
}

impl Catalog {
    /// Build a catalog from unvalidated records.
    ///
    /// Every record must have a non-blank name and in-range coordinates.
    /// Duplicate names and duplicate coordinates are accepted.
    pub fn from_records(
        datum: Datum,
        records: impl IntoIterator<Item = StationRecord>,
    ) -> Result<Self, CatalogError> {
        let stations = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| validate_record(index, record))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { datum, stations })
    }

    /// Build a catalog from already-validated stations.
    pub fn from_stations(datum: Datum, stations: Vec<Station>) -> Self {
        Self { datum, stations }
    }

    /// A catalog with no stations.
    pub fn empty(datum: Datum) -> Self {
        Self {
            datum,
            stations: Vec::new(),
        }
    }

    /// The datum all station coordinates are expressed in.
    pub fn datum(&self) -> Datum {
        self.datum
    }

    /// Look up a station by id.
    pub fn get(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id.0)
    }

    /// Iterate stations in catalog order, paired with their ids.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (StationId, &Station)> + '_ {
        self.stations
            .iter()
            .enumerate()
            .map(|(i, s)| (StationId(i), s))
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

/// Turn a record into a station, or explain why it is malformed.
fn validate_record(index: usize, record: StationRecord) -> Result<Station, CatalogError> {
    if record.name.trim().is_empty() {
        return Err(CatalogError::InvalidStation {
            index,
            reason: "name must not be empty".to_string(),
        });
    }

    let location = Coordinate::new(record.latitude, record.longitude).map_err(|e| {
        CatalogError::InvalidStation {
            index,
            reason: e.to_string(),
        }
    })?;

    Ok(Station {
        name: record.name,
        address: record.address,
        phone_number: record.phone_number,
        location,
    })
}
