//! Catalog error types.
//!
//! Only the loading layer (datasets, translation tables, configuration)
//! can fail. Filtering, sorting and variant resolution never return errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading catalog inputs.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A file could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON input could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration could not be serialized to TOML.
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Configuration parsed but holds an unusable value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A keyword (sort key, ownership state, page size) was not recognized.
    #[error("Unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CatalogError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        CatalogError::UnknownValue {
            kind,
            value: value.into(),
        }
    }
}

/// Result alias for catalog loading operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Read a whole file, attaching the path to any I/O failure.
pub(crate) fn read_file(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))
}
