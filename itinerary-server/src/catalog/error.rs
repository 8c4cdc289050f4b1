//! Catalog loading error types.

use std::path::PathBuf;

use crate::domain::DomainError;

/// Errors that can occur when loading a bus line catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog file could not be read
    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The catalog is not valid JSON or has the wrong shape
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A line record could not be converted
    #[error("line {line}: {reason}")]
    Record { line: String, reason: String },

    /// The converted lines do not form a valid catalog
    #[error(transparent)]
    Domain(#[from] DomainError),
}
