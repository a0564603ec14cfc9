//! Application state for the web layer.

use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::{AddressBackends, BackendKind};
use crate::geocode::AddressResolver;
use crate::resolver::Selection;
use crate::suggest::AddressSuggester;

/// Shared application state.
///
/// The catalog is read-only after startup, so handlers share it without
/// locking.
#[derive(Clone)]
pub struct AppState {
    /// Station catalog
    pub catalog: Arc<Catalog>,

    /// Address-to-coordinate backend
    pub geocoder: Arc<dyn AddressResolver>,

    /// Autocomplete backend
    pub suggester: Arc<dyn AddressSuggester>,

    /// Which backend is wired in (shown on the index page)
    pub backend: BackendKind,

    /// Selection used when a request asks for neither `k` nor `all`
    pub default_selection: Selection,
}

impl AppState {
    /// Create a new app state.
    pub fn new(catalog: Catalog, backends: AddressBackends, default_k: NonZeroUsize) -> Self {
        Self {
            catalog: Arc::new(catalog),
            geocoder: backends.resolver,
            suggester: backends.suggester,
            backend: backends.kind,
            default_selection: Selection::Nearest(default_k),
        }
    }
}
