//! Catalog loading errors.
//!
//! The two engines themselves never fail (out-of-phase input is ignored,
//! unknown ids degrade to fallbacks); errors only exist at the catalog
//! loading boundary.

use thiserror::Error;

/// Errors that can occur while loading or validating a content catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// YAML parsing or serialization failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing or serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog cross-reference validation failed.
    #[error("Validation error: {0}")]
    Validation(String),
}
