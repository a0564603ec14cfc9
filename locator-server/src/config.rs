//! Server configuration.
//!
//! Everything is read from environment variables once at startup. Parsing
//! goes through a lookup closure so tests never touch the process env.

use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::catalog::{Catalog, CatalogError, load_catalog};
use crate::domain::Datum;
use crate::geocode::{
    AddressResolver, CachedResolver, GeocodeCacheConfig, LlmGeocoder, StaticResolver, TableError,
    UnconfiguredResolver,
};
use crate::llm::{LlmClient, LlmConfig, LlmError};
use crate::suggest::{AddressSuggester, LlmSuggester};

const DEFAULT_K: NonZeroUsize = NonZeroUsize::new(3).unwrap();
const DEFAULT_STATIC_DIR: &str = "locator-server/static";

/// Errors that prevent the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable has an unusable value
    #[error("invalid {var}={value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: &'static str,
    },

    /// Address backend and catalog disagree on datum
    #[error("address backend returns {backend} coordinates but the catalog is {catalog}")]
    DatumMismatch { catalog: Datum, backend: Datum },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// LLM backend settings.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub client: LlmConfig,
    /// Datum the model is asked to answer in.
    pub datum: Datum,
    /// Optional region hint for suggestions.
    pub region: Option<String>,
}

/// Complete server configuration.
#[derive(Debug, Clone)]
pub struct LocatorConfig {
    pub listen_addr: SocketAddr,
    /// Catalog file; the built-in catalog when `None`.
    pub catalog_path: Option<PathBuf>,
    /// K used when a request names neither `k` nor `all`.
    pub default_k: NonZeroUsize,
    /// Static address table; takes precedence over the LLM.
    pub geocode_table: Option<PathBuf>,
    pub geocode_cache: GeocodeCacheConfig,
    pub llm: Option<LlmSettings>,
    pub static_dir: PathBuf,
}

impl LocatorConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let listen_addr = match get("LOCATOR_ADDR") {
            Some(value) => value.trim().parse::<SocketAddr>().map_err(|_| ConfigError::Invalid {
                var: "LOCATOR_ADDR",
                value,
                reason: "expected host:port",
            })?,
            None => SocketAddr::from(([127, 0, 0, 1], 3000)),
        };

        let default_k = match get("LOCATOR_DEFAULT_K") {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(NonZeroUsize::new)
                .ok_or(ConfigError::Invalid {
                    var: "LOCATOR_DEFAULT_K",
                    value,
                    reason: "expected a positive integer",
                })?,
            None => DEFAULT_K,
        };

        let mut geocode_cache = GeocodeCacheConfig::default();
        if let Some(value) = get("LOCATOR_GEOCODE_CACHE_TTL_SECS") {
            let secs = parse_u64("LOCATOR_GEOCODE_CACHE_TTL_SECS", value)?;
            geocode_cache.ttl = Duration::from_secs(secs);
        }
        if let Some(value) = get("LOCATOR_GEOCODE_CACHE_CAPACITY") {
            geocode_cache.max_capacity = parse_u64("LOCATOR_GEOCODE_CACHE_CAPACITY", value)?;
        }

        let llm = match get("LLM_API_KEY") {
            Some(api_key) => {
                let mut client = LlmConfig::new(api_key);
                if let Some(url) = get("LLM_BASE_URL") {
                    client = client.with_base_url(url.trim());
                }
                if let Some(model) = get("LLM_MODEL") {
                    client = client.with_model(model.trim());
                }
                if let Some(value) = get("LLM_TIMEOUT_SECS") {
                    client = client.with_timeout(parse_u64("LLM_TIMEOUT_SECS", value)?);
                }

                let datum = match get("LLM_DATUM") {
                    Some(value) => Datum::parse(&value).ok_or(ConfigError::Invalid {
                        var: "LLM_DATUM",
                        value,
                        reason: "expected wgs84 or gcj02",
                    })?,
                    None => Datum::Gcj02,
                };

                Some(LlmSettings {
                    client,
                    datum,
                    region: get("LLM_REGION").map(|r| r.trim().to_string()),
                })
            }
            None => None,
        };

        Ok(Self {
            listen_addr,
            catalog_path: get("LOCATOR_CATALOG").map(PathBuf::from),
            default_k,
            geocode_table: get("LOCATOR_GEOCODE_TABLE").map(PathBuf::from),
            geocode_cache,
            llm,
            static_dir: get("LOCATOR_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
        })
    }

    /// Load the configured catalog, or the built-in one.
    pub fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => load_catalog(path),
            None => {
                let catalog = Catalog::builtin();
                info!(
                    stations = catalog.len(),
                    datum = %catalog.datum(),
                    "using built-in station catalog"
                );
                Ok(catalog)
            }
        }
    }
}

fn parse_u64(var: &'static str, value: String) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        value,
        reason: "expected a non-negative integer",
    })
}

/// Which address backend is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Table,
    Llm,
    Unconfigured,
}

/// The geocoder and suggester the server runs with.
pub struct AddressBackends {
    pub kind: BackendKind,
    pub resolver: Arc<dyn AddressResolver>,
    pub suggester: Arc<dyn AddressSuggester>,
}

impl AddressBackends {
    /// Build backends from config and check their datum against the catalog.
    pub fn build(config: &LocatorConfig, catalog_datum: Datum) -> Result<Self, ConfigError> {
        let backends = if let Some(path) = &config.geocode_table {
            let table = Arc::new(StaticResolver::load(path)?);
            Self {
                kind: BackendKind::Table,
                resolver: table.clone(),
                suggester: table,
            }
        } else if let Some(llm) = &config.llm {
            let client = LlmClient::new(llm.client.clone())?;
            let geocoder = LlmGeocoder::new(client.clone(), llm.datum);
            let resolver: Arc<dyn AddressResolver> = if config.geocode_cache.is_enabled() {
                Arc::new(CachedResolver::new(geocoder, &config.geocode_cache))
            } else {
                Arc::new(geocoder)
            };
            info!(model = %client.model(), datum = %llm.datum, "using LLM address backend");

            Self {
                kind: BackendKind::Llm,
                resolver,
                suggester: Arc::new(LlmSuggester::new(client, llm.region.as_deref())),
            }
        } else {
            warn!("no address backend configured; address search is disabled");
            let unconfigured = Arc::new(UnconfiguredResolver::new(catalog_datum));
            Self {
                kind: BackendKind::Unconfigured,
                resolver: unconfigured.clone(),
                suggester: unconfigured,
            }
        };

        check_datum(catalog_datum, backends.resolver.datum())?;
        Ok(backends)
    }
}

/// Refuse to pair a backend with a catalog in a different datum.
pub fn check_datum(catalog: Datum, backend: Datum) -> Result<(), ConfigError> {
    if catalog == backend {
        Ok(())
    } else {
        Err(ConfigError::DatumMismatch { catalog, backend })
    }
}
