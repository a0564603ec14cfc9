//! Catalog file loading.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::CatalogError;
use super::{Catalog, StationRecord};
use crate::domain::Datum;

/// On-disk catalog format.
///
/// ```json
/// {
///   "datum": "gcj02",
///   "stations": [
///     { "name": "...", "address": "...", "phoneNumber": "...",
///       "latitude": 30.63, "longitude": 114.23 }
///   ]
/// }
/// ```
#[derive(Debug, Deserialize, Serialize)]
pub struct CatalogFile {
    /// Defaults to WGS84 when absent.
    #[serde(default)]
    pub datum: Datum,
    pub stations: Vec<StationRecord>,
}

/// Parse and validate a catalog from JSON text.
pub fn parse_catalog(json: &str) -> Result<Catalog, CatalogError> {
    let file: CatalogFile = serde_json::from_str(json).map_err(|e| CatalogError::Json {
        message: e.to_string(),
    })?;

    Catalog::from_records(file.datum, file.stations)
}

/// Read, parse and validate a catalog file.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = parse_catalog(&json)?;
    info!(
        path = %path.display(),
        stations = catalog.len(),
        datum = %catalog.datum(),
        "loaded station catalog"
    );

    Ok(catalog)
}
