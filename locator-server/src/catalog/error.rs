//! Catalog error types.

use std::path::PathBuf;

/// Errors that can occur while building or loading a station catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog file is not valid JSON or has the wrong shape
    #[error("catalog JSON parse error: {message}")]
    Json { message: String },

    /// A record failed structural validation
    #[error("invalid station at index {index}: {reason}")]
    InvalidStation { index: usize, reason: String },
}
