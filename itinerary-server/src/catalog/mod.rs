//! Bus line catalog loading.
//!
//! The catalog is a JSON document listing every line and its stops in
//! travel order:
//!
//! ```json
//! { "lines": [ { "id": "42", "name": "Airport Express",
//!                "stops": [ { "name": "Harbour", "latitude": 28.1, "longitude": -15.4 },
//!                           { "name": "Market", "location": "28.2° N, 15.5° W" } ] } ] }
//! ```
//!
//! Loading happens once at startup; the resulting [`TransitCatalog`] is an
//! immutable snapshot shared by all planning requests.

mod convert;
mod error;
mod types;

use std::path::Path;

use tracing::info;

use crate::domain::TransitCatalog;

pub use convert::{convert_catalog, convert_line};
pub use error::CatalogError;
pub use types::{CatalogRecord, LineRecord, PositionRecord, StopRecord};

/// Read and validate a catalog file.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if the file cannot be read, and otherwise
/// whatever [`parse_catalog`] returns.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<TransitCatalog, CatalogError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = parse_catalog(&contents)?;
    info!(path = %path.display(), lines = catalog.len(), "catalog loaded");
    Ok(catalog)
}

/// Parse and validate a catalog document.
pub fn parse_catalog(json: &str) -> Result<TransitCatalog, CatalogError> {
    let record: CatalogRecord = serde_json::from_str(json)?;
    convert_catalog(&record)
}
