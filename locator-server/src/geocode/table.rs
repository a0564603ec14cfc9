//! Static address table.
//!
//! A fixed list of known addresses and their coordinates. Useful for
//! offline deployments and as a deterministic backend in tests. The same
//! table also serves prefix-match suggestions.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::GeocodeError;
use super::{AddressResolver, normalize_address};
use crate::domain::{Coordinate, Datum};
use crate::suggest::{AddressSuggester, MAX_SUGGESTIONS, SuggestError};

/// Errors while loading an address table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// Table file could not be read
    #[error("failed to read address table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Table file is not valid JSON or has the wrong shape
    #[error("address table JSON parse error: {message}")]
    Json { message: String },

    /// An entry failed validation
    #[error("invalid address table entry {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },
}

/// One known address.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddressEntry {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// On-disk table format.
#[derive(Debug, Deserialize, Serialize)]
pub struct AddressTableFile {
    /// Defaults to WGS84 when absent.
    #[serde(default)]
    pub datum: Datum,
    pub addresses: Vec<AddressEntry>,
}

/// Address resolver backed by a fixed lookup table.
///
/// Lookups are exact after [`normalize_address`]; there is no fuzzy
/// matching, so an unknown address is [`GeocodeError::NotFound`].
#[derive(Debug, Clone)]
pub struct StaticResolver {
    datum: Datum,
    by_key: HashMap<String, Coordinate>,
    /// (display form, normalized form) in table order.
    known: Vec<(String, String)>,
}

impl StaticResolver {
    /// Build a table from entries, rejecting blank, duplicate or
    /// out-of-range ones.
    pub fn from_entries(
        datum: Datum,
        entries: impl IntoIterator<Item = AddressEntry>,
    ) -> Result<Self, TableError> {
        let mut by_key = HashMap::new();
        let mut known = Vec::new();

        for (index, entry) in entries.into_iter().enumerate() {
            let key = normalize_address(&entry.address);
            if key.is_empty() {
                return Err(TableError::InvalidEntry {
                    index,
                    reason: "address must not be empty".to_string(),
                });
            }

            let location = Coordinate::new(entry.latitude, entry.longitude).map_err(|e| {
                TableError::InvalidEntry {
                    index,
                    reason: e.to_string(),
                }
            })?;

            if by_key.insert(key.clone(), location).is_some() {
                return Err(TableError::InvalidEntry {
                    index,
                    reason: format!("duplicate address: {}", entry.address.trim()),
                });
            }

            known.push((entry.address.trim().to_string(), key));
        }

        Ok(Self {
            datum,
            by_key,
            known,
        })
    }

    /// Parse a table from JSON text.
    pub fn parse(json: &str) -> Result<Self, TableError> {
        let file: AddressTableFile = serde_json::from_str(json).map_err(|e| TableError::Json {
            message: e.to_string(),
        })?;

        Self::from_entries(file.datum, file.addresses)
    }

    /// Read and parse a table file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let table = Self::parse(&json)?;
        info!(
            path = %path.display(),
            addresses = table.len(),
            datum = %table.datum,
            "loaded address table"
        );

        Ok(table)
    }

    /// Look up an address synchronously.
    pub fn lookup(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        let key = normalize_address(address);
        if key.is_empty() {
            return Err(GeocodeError::EmptyAddress);
        }

        self.by_key
            .get(&key)
            .copied()
            .ok_or_else(|| GeocodeError::NotFound {
                address: address.trim().to_string(),
            })
    }

    /// Known addresses matching a partial input: prefix matches first, then
    /// substring matches, each in table order.
    pub fn matching(&self, partial: &str) -> Vec<String> {
        let needle = normalize_address(partial);
        if needle.is_empty() {
            return Vec::new();
        }

        let prefixed = self.known.iter().filter(|(_, key)| key.starts_with(&needle));
        let contained = self
            .known
            .iter()
            .filter(|(_, key)| !key.starts_with(&needle) && key.contains(&needle));

        prefixed
            .chain(contained)
            .take(MAX_SUGGESTIONS)
            .map(|(display, _)| display.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

impl AddressResolver for StaticResolver {
    fn datum(&self) -> Datum {
        self.datum
    }

    fn resolve<'a>(
        &'a self,
        address: &'a str,
    ) -> BoxFuture<'a, Result<Coordinate, GeocodeError>> {
        Box::pin(async move { self.lookup(address) })
    }
}

impl AddressSuggester for StaticResolver {
    fn suggest<'a>(
        &'a self,
        partial: &'a str,
    ) -> BoxFuture<'a, Result<Vec<String>, SuggestError>> {
        Box::pin(async move { Ok(self.matching(partial)) })
    }
}
