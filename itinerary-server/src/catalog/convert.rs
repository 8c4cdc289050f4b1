//! Conversion from catalog records to domain types.

use crate::domain::{GeoPoint, InvalidCoordinate, LineId, Stop, TransitCatalog, TransitLine};

use super::error::CatalogError;
use super::types::{CatalogRecord, LineRecord, PositionRecord, StopRecord};

/// Convert a whole catalog document.
///
/// # Errors
///
/// Fails on the first line with an empty identifier or an invalid stop
/// position, and on duplicate line identifiers.
pub fn convert_catalog(record: &CatalogRecord) -> Result<TransitCatalog, CatalogError> {
    let lines = record
        .lines
        .iter()
        .map(convert_line)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TransitCatalog::new(lines)?)
}

/// Convert a single line record.
pub fn convert_line(record: &LineRecord) -> Result<TransitLine, CatalogError> {
    let id = LineId::new(&record.id)?;

    let stops = record
        .stops
        .iter()
        .enumerate()
        .map(|(index, stop)| {
            convert_stop(stop).map_err(|reason| CatalogError::Record {
                line: id.to_string(),
                reason: format!("stop {index}: {reason}"),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TransitLine::new(id, record.name.clone(), stops))
}

fn convert_stop(record: &StopRecord) -> Result<Stop, InvalidCoordinate> {
    let position = match &record.position {
        PositionRecord::Coordinates {
            latitude,
            longitude,
        } => GeoPoint::new(*latitude, *longitude)?,
        PositionRecord::Location { location } => location.parse()?,
    };
    Ok(Stop::new(record.name.clone(), position))
}
