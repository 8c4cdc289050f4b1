//! Domain types for the itinerary planner.
//!
//! Plain immutable values describing the transit network and the
//! itineraries computed over it. Types enforce their invariants at
//! construction time, so code that receives them can trust their validity.

mod catalog;
mod error;
mod geo;
mod itinerary;
mod line;

pub use catalog::TransitCatalog;
pub use error::DomainError;
pub use geo::{EARTH_RADIUS_M, GeoPoint, InvalidCoordinate, distance};
pub use itinerary::{Itinerary, RouteSegment};
pub use line::{LineId, LineRef, Stop, TransitLine, WALKING_LINE_ID};
