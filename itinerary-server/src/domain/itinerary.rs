//! Itinerary types.
//!
//! An `Itinerary` is a complete candidate trip from origin to destination,
//! made of one or more `RouteSegment`s. Each segment rides one line (or the
//! synthetic walking line) and records the walking on either side of it.

use super::{DomainError, GeoPoint, LineRef, Stop, TransitLine};

/// Label used for segment endpoints that are not stops.
const UNNAMED_STOP: &str = "Bus Stop";

/// One leg of an itinerary.
///
/// For bus segments `start`/`end` are the boarding and alighting stop
/// positions. For the walking segment they are the raw origin and
/// destination and there are no stops.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSegment {
    pub line: LineRef,
    pub start: GeoPoint,
    pub end: GeoPoint,
    pub boarding: Option<Stop>,
    pub alighting: Option<Stop>,
    /// Walking before `start`, in meters.
    pub walk_to_start: f64,
    /// Walking after `end`, in meters.
    pub walk_from_end: f64,
    /// Distance covered on the line itself, in meters.
    pub travel_distance: f64,
}

impl RouteSegment {
    /// A segment riding `line` from stop `board` to stop `alight`.
    ///
    /// # Panics
    ///
    /// Panics if the indices do not describe forward travel on `line`.
    pub fn on_line(
        line: &TransitLine,
        board: usize,
        alight: usize,
        walk_to_start: f64,
        walk_from_end: f64,
    ) -> Self {
        let travel_distance = line.in_line_distance(board, alight);
        let boarding = line.stops()[board].clone();
        let alighting = line.stops()[alight].clone();

        Self {
            line: LineRef::from(line),
            start: boarding.position,
            end: alighting.position,
            boarding: Some(boarding),
            alighting: Some(alighting),
            walk_to_start,
            walk_from_end,
            travel_distance,
        }
    }

    /// Sum of the walking on both sides plus the in-line distance.
    pub fn total_distance(&self) -> f64 {
        self.walk_to_start + self.travel_distance + self.walk_from_end
    }

    /// Name of the boarding stop, or a generic label.
    pub fn boarding_name(&self) -> &str {
        self.boarding
            .as_ref()
            .map_or(UNNAMED_STOP, |stop| stop.name.as_str())
    }

    /// Name of the alighting stop, or a generic label.
    pub fn alighting_name(&self) -> &str {
        self.alighting
            .as_ref()
            .map_or(UNNAMED_STOP, |stop| stop.name.as_str())
    }
}

/// A complete candidate trip.
///
/// # Invariants
///
/// - At least one segment
/// - `transfer_count == segments.len() - 1` for bus itineraries, and 0 for
///   the walking itinerary
/// - Totals are derived from the segments at construction and never change
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    segments: Vec<RouteSegment>,
    total_walking: f64,
    total_transit: f64,
    transfer_count: usize,
}

impl Itinerary {
    /// Build a bus itinerary from its segments, in travel order.
    ///
    /// # Errors
    ///
    /// Returns `Err` if there are no segments.
    pub fn by_bus(segments: Vec<RouteSegment>) -> Result<Self, DomainError> {
        if segments.is_empty() {
            return Err(DomainError::EmptyItinerary);
        }

        let total_walking = segments
            .iter()
            .map(|s| s.walk_to_start + s.walk_from_end)
            .sum();
        let total_transit = segments.iter().map(|s| s.travel_distance).sum();
        let transfer_count = segments.len() - 1;

        Ok(Self {
            segments,
            total_walking,
            total_transit,
            transfer_count,
        })
    }

    /// A pure walk from `origin` to `destination` on the synthetic walking line.
    ///
    /// The whole distance counts as walking; nothing counts as transit.
    pub fn walking(origin: GeoPoint, destination: GeoPoint) -> Self {
        let distance = origin.distance_to(&destination);
        let segment = RouteSegment {
            line: LineRef::from(&TransitLine::walking()),
            start: origin,
            end: destination,
            boarding: None,
            alighting: None,
            walk_to_start: 0.0,
            walk_from_end: 0.0,
            travel_distance: distance,
        };

        Self {
            segments: vec![segment],
            total_walking: distance,
            total_transit: 0.0,
            transfer_count: 0,
        }
    }

    pub fn segments(&self) -> &[RouteSegment] {
        &self.segments
    }

    /// Total walking in meters, including transfer walks.
    pub fn total_walking(&self) -> f64 {
        self.total_walking
    }

    /// Total distance covered on buses in meters.
    pub fn total_transit(&self) -> f64 {
        self.total_transit
    }

    /// Walking plus transit.
    pub fn total_distance(&self) -> f64 {
        self.total_walking + self.total_transit
    }

    pub fn transfer_count(&self) -> usize {
        self.transfer_count
    }

    /// Returns true if this is the synthetic all-walking itinerary.
    pub fn is_walking_only(&self) -> bool {
        self.segments.iter().all(|s| s.line.is_walking)
    }

    /// The lines ridden, in order.
    pub fn lines(&self) -> impl Iterator<Item = &LineRef> {
        self.segments.iter().map(|s| &s.line)
    }
}
