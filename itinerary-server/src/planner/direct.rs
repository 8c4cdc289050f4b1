//! Zero-transfer search on a single line.

use tracing::debug;

use crate::domain::{GeoPoint, Itinerary, RouteSegment, TransitLine};

use super::scan::{Cost, shortest, walkable_stops};

/// Find the shortest ride on `line` between a stop near `origin` and a
/// later (or the same) stop near `destination`.
///
/// Every pair of qualifying stops is considered: O(n²) per line.
pub(super) fn find_direct(
    line: &TransitLine,
    origin: &GeoPoint,
    destination: &GeoPoint,
    max_walk: f64,
) -> Option<Itinerary> {
    let boardings = walkable_stops(line, origin, max_walk);
    if boardings.is_empty() {
        return None;
    }
    let alightings = walkable_stops(line, destination, max_walk);

    let combinations = boardings.iter().flat_map(|board| {
        alightings
            .iter()
            .filter(move |alight| alight.index >= board.index)
            .map(move |alight| {
                let walking = board.walk + alight.walk;
                let cost = Cost {
                    total: board.walk + line.in_line_distance(board.index, alight.index) + alight.walk,
                    walking,
                };
                (cost, (*board, *alight))
            })
    });

    let (cost, (board, alight)) = shortest(combinations)?;
    debug!(
        line = %line.id(),
        board = board.index,
        alight = alight.index,
        total = cost.total,
        "direct ride found"
    );

    let segment = RouteSegment::on_line(line, board.index, alight.index, board.walk, alight.walk);
    Itinerary::by_bus(vec![segment]).ok()
}
