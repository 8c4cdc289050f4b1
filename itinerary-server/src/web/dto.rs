//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{GeoPoint, InvalidCoordinate, Itinerary, RouteSegment, TransitLine};
use crate::planner::{PlanResult, SearchStats};

/// A coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Validate into a domain point.
    pub fn to_point(self) -> Result<GeoPoint, InvalidCoordinate> {
        GeoPoint::new(self.lat, self.lon)
    }

    pub fn from_point(point: &GeoPoint) -> Self {
        Self {
            lat: point.latitude(),
            lon: point.longitude(),
        }
    }
}

/// Request body for `POST /itinerary/plan`.
#[derive(Debug, Deserialize)]
pub struct PlanItineraryRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
}

/// Query string for `GET /itinerary/plan`.
///
/// Both fields use the coordinate string syntax, e.g. `28.1,-15.4` or
/// `28.1° N, 15.4° W`.
#[derive(Debug, Deserialize)]
pub struct PlanItineraryQuery {
    pub from: String,
    pub to: String,
}

/// One segment of an itinerary.
#[derive(Debug, Serialize)]
pub struct SegmentResult {
    /// Line identifier ("Walk" for the walking segment)
    pub line_id: String,

    /// Display name of the line
    pub line_name: String,

    pub is_walking: bool,

    /// Boarding stop name, or a generic label
    pub boarding: String,

    /// Alighting stop name, or a generic label
    pub alighting: String,

    pub start: Coordinate,
    pub end: Coordinate,

    /// Walk before boarding, in meters
    pub walk_to_start_m: f64,

    /// Walk after alighting, in meters
    pub walk_from_end_m: f64,

    /// Distance on the line, in meters
    pub travel_distance_m: f64,
}

/// An itinerary option.
#[derive(Debug, Serialize)]
pub struct ItineraryResult {
    pub segments: Vec<SegmentResult>,
    pub total_walking_m: f64,
    pub total_transit_m: f64,
    pub total_distance_m: f64,
    pub transfers: usize,
    pub walking_only: bool,
}

/// Search work counters.
#[derive(Debug, Serialize)]
pub struct StatsResult {
    pub lines_searched: usize,
    pub pairs_searched: usize,
    pub triples_searched: usize,
    pub lines_skipped: usize,
    pub double_transfer_ran: bool,
}

/// Response for itinerary planning.
#[derive(Debug, Serialize)]
pub struct PlanItineraryResponse {
    /// Found itineraries, best first
    pub itineraries: Vec<ItineraryResult>,

    pub stats: StatsResult,
}

/// A line in the catalog listing.
#[derive(Debug, Serialize)]
pub struct LineSummary {
    pub id: String,
    pub name: String,
    pub stop_count: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl SegmentResult {
    pub fn from_segment(segment: &RouteSegment) -> Self {
        Self {
            line_id: segment.line.id.to_string(),
            line_name: segment.line.name.clone(),
            is_walking: segment.line.is_walking,
            boarding: segment.boarding_name().to_string(),
            alighting: segment.alighting_name().to_string(),
            start: Coordinate::from_point(&segment.start),
            end: Coordinate::from_point(&segment.end),
            walk_to_start_m: segment.walk_to_start,
            walk_from_end_m: segment.walk_from_end,
            travel_distance_m: segment.travel_distance,
        }
    }
}

impl ItineraryResult {
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            segments: itinerary
                .segments()
                .iter()
                .map(SegmentResult::from_segment)
                .collect(),
            total_walking_m: itinerary.total_walking(),
            total_transit_m: itinerary.total_transit(),
            total_distance_m: itinerary.total_distance(),
            transfers: itinerary.transfer_count(),
            walking_only: itinerary.is_walking_only(),
        }
    }
}

impl From<&SearchStats> for StatsResult {
    fn from(stats: &SearchStats) -> Self {
        Self {
            lines_searched: stats.lines_searched,
            pairs_searched: stats.pairs_searched,
            triples_searched: stats.triples_searched,
            lines_skipped: stats.lines_skipped,
            double_transfer_ran: stats.double_transfer_ran,
        }
    }
}

impl PlanItineraryResponse {
    pub fn from_result(result: &PlanResult) -> Self {
        Self {
            itineraries: result
                .itineraries
                .iter()
                .map(ItineraryResult::from_itinerary)
                .collect(),
            stats: StatsResult::from(&result.stats),
        }
    }
}

impl LineSummary {
    pub fn from_line(line: &TransitLine) -> Self {
        Self {
            id: line.id().to_string(),
            name: line.display_name(),
            stop_count: line.stops().len(),
        }
    }
}
