//! Catalog file records.
//!
//! These types map directly to the JSON catalog format. Validation happens
//! when they are converted to domain types, not here.

use serde::Deserialize;

/// Top-level catalog document.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogRecord {
    pub lines: Vec<LineRecord>,
}

/// One bus line in the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct LineRecord {
    /// Line number or other identifier, e.g. "42".
    pub id: String,

    /// Branded name, shown instead of "Bus <id>" when present.
    pub name: Option<String>,

    /// Stops in travel order. A missing list is read as empty, and the
    /// line is then skipped by the planner.
    #[serde(default)]
    pub stops: Vec<StopRecord>,
}

/// One stop on a line.
#[derive(Debug, Clone, Deserialize)]
pub struct StopRecord {
    pub name: String,

    #[serde(flatten)]
    pub position: PositionRecord,
}

/// Where a stop is: either numeric coordinates or a location string such
/// as `"28.9865° N, 10.0572° W"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PositionRecord {
    Coordinates { latitude: f64, longitude: f64 },
    Location { location: String },
}
