//! Transit lines and their stops.

use std::fmt;

use super::{DomainError, GeoPoint};

/// Identifier of the synthetic walking line.
pub const WALKING_LINE_ID: &str = "Walk";

/// Display name of the synthetic walking line.
const WALKING_LINE_NAME: &str = "Walking";

/// A non-empty line identifier, e.g. a bus number.
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::LineId;
///
/// let id = LineId::new(" 12 ").unwrap();
/// assert_eq!(id.as_str(), "12");
/// assert!(LineId::new("  ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(String);

impl LineId {
    /// Create an identifier, trimming surrounding whitespace.
    pub fn new(id: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyLineId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named stop at a fixed position.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub name: String,
    pub position: GeoPoint,
}

impl Stop {
    pub fn new(name: impl Into<String>, position: GeoPoint) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// A bus line: an ordered sequence of stops in travel direction.
///
/// Travel along a line is only valid forwards, from a lower stop index to
/// an equal or higher one.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitLine {
    id: LineId,
    name: Option<String>,
    stops: Vec<Stop>,
    walking: bool,
}

impl TransitLine {
    /// Create a line. Structure is not checked here; see [`Self::ensure_routable`].
    pub fn new(id: LineId, name: Option<String>, stops: Vec<Stop>) -> Self {
        Self {
            id,
            name,
            stops,
            walking: false,
        }
    }

    /// The synthetic line used for pure walking itineraries. It has no stops.
    pub fn walking() -> Self {
        Self {
            id: LineId(WALKING_LINE_ID.to_string()),
            name: Some(WALKING_LINE_NAME.to_string()),
            stops: Vec::new(),
            walking: true,
        }
    }

    pub fn id(&self) -> &LineId {
        &self.id
    }

    /// Returns the configured name, or `"Bus <id>"` when there is none.
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Bus {}", self.id),
        }
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Returns true if this is the synthetic walking line.
    pub fn is_walking(&self) -> bool {
        self.walking
    }

    /// Check the line can take part in a search.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MalformedLine`] if the line has no stops.
    pub fn ensure_routable(&self) -> Result<(), DomainError> {
        if self.stops.is_empty() {
            return Err(DomainError::MalformedLine {
                line: self.id.clone(),
                reason: "line has no stops",
            });
        }
        Ok(())
    }

    /// Distance travelled along the line from stop `from` to stop `to`.
    ///
    /// This is the sum of the great-circle distances between consecutive
    /// stops in `from..=to`; `from == to` yields zero.
    ///
    /// # Panics
    ///
    /// Panics if `from > to` or `to` is out of bounds. Callers must only
    /// ask for forward travel between existing stops.
    pub fn in_line_distance(&self, from: usize, to: usize) -> f64 {
        assert!(
            from <= to && to < self.stops.len(),
            "invalid in-line span {from}..={to} on line {} with {} stops",
            self.id,
            self.stops.len()
        );

        self.stops[from..=to]
            .windows(2)
            .map(|pair| pair[0].position.distance_to(&pair[1].position))
            .sum()
    }
}

/// Owned snapshot of a line's identity, carried by itinerary segments.
///
/// Segments hold this instead of a reference into the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRef {
    pub id: LineId,
    pub name: String,
    pub is_walking: bool,
}

impl From<&TransitLine> for LineRef {
    fn from(line: &TransitLine) -> Self {
        Self {
            id: line.id.clone(),
            name: line.display_name(),
            is_walking: line.is_walking(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(name: &str, lat: f64, lon: f64) -> Stop {
        Stop::new(name, GeoPoint::new(lat, lon).unwrap())
    }

    fn line(stops: Vec<Stop>) -> TransitLine {
        TransitLine::new(LineId::new("1").unwrap(), None, stops)
    }

    #[test]
    fn display_name_falls_back_to_number() {
        let id = LineId::new("12").unwrap();
        assert_eq!(TransitLine::new(id.clone(), None, vec![]).display_name(), "Bus 12");
        assert_eq!(
            TransitLine::new(id.clone(), Some("  ".into()), vec![]).display_name(),
            "Bus 12"
        );
        assert_eq!(
            TransitLine::new(id, Some("Airport Express".into()), vec![]).display_name(),
            "Airport Express"
        );
    }

    #[test]
    fn walking_line_has_no_stops() {
        let walk = TransitLine::walking();
        assert!(walk.is_walking());
        assert!(walk.stops().is_empty());
        assert_eq!(walk.display_name(), "Walking");
        assert!(LineRef::from(&walk).is_walking);
    }

    #[test]
    fn bus_line_is_not_walking() {
        let l = TransitLine::new(LineId::new(WALKING_LINE_ID).unwrap(), None, vec![]);
        assert!(!l.is_walking());
        assert!(!LineRef::from(&l).is_walking);
    }

    #[test]
    fn ensure_routable_rejects_empty_line() {
        assert!(matches!(
            line(vec![]).ensure_routable(),
            Err(DomainError::MalformedLine { .. })
        ));
        assert!(line(vec![stop("A", 0.0, 0.0)]).ensure_routable().is_ok());
    }

    #[test]
    fn in_line_distance_same_stop_is_zero() {
        let l = line(vec![stop("A", 0.0, 0.0), stop("B", 0.0, 0.01)]);
        assert_eq!(l.in_line_distance(0, 0), 0.0);
        assert_eq!(l.in_line_distance(1, 1), 0.0);
    }

    #[test]
    fn in_line_distance_single_stop_line() {
        let l = line(vec![stop("A", 0.0, 0.0)]);
        assert_eq!(l.in_line_distance(0, 0), 0.0);
    }

    #[test]
    fn in_line_distance_sums_consecutive_hops() {
        let a = stop("A", 0.0, 0.0);
        let b = stop("B", 0.0, 0.01);
        let c = stop("C", 0.01, 0.01);
        let expected =
            a.position.distance_to(&b.position) + b.position.distance_to(&c.position);
        let l = line(vec![a, b, c]);

        assert!((l.in_line_distance(0, 2) - expected).abs() < 1e-9);
        // Not the straight-line distance
        assert!(l.in_line_distance(0, 2) > l.stops()[0].position.distance_to(&l.stops()[2].position));
    }

    #[test]
    #[should_panic(expected = "invalid in-line span")]
    fn in_line_distance_backwards_panics() {
        let l = line(vec![stop("A", 0.0, 0.0), stop("B", 0.0, 0.01)]);
        l.in_line_distance(1, 0);
    }

    #[test]
    fn line_id_debug_and_display() {
        let id = LineId::new("7A").unwrap();
        assert_eq!(format!("{id}"), "7A");
        assert_eq!(format!("{id:?}"), "LineId(7A)");
    }
}
