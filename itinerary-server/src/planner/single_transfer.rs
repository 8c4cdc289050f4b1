//! One-transfer search composing two lines.

use tracing::debug;

use crate::domain::{GeoPoint, Itinerary, RouteSegment, TransitLine};

use super::scan::{Cost, shortest, walkable_stops};
use super::transfer_index::{TransferPoint, TransferPointIndex};

/// Find the shortest itinerary riding `first`, walking to `second`, and riding that.
///
/// Considers every boarding stop on `first` near `origin`, every transfer
/// point reachable from it, and every alighting stop on `second` near
/// `destination`. The transfer walk is reported half on each side of the
/// change.
pub(super) fn find_single_transfer(
    first: &TransitLine,
    second: &TransitLine,
    origin: &GeoPoint,
    destination: &GeoPoint,
    max_walk: f64,
    max_transfer: f64,
) -> Option<Itinerary> {
    let boardings = walkable_stops(first, origin, max_walk);
    if boardings.is_empty() {
        return None;
    }
    let alightings = walkable_stops(second, destination, max_walk);
    if alightings.is_empty() {
        return None;
    }
    let transfers = TransferPointIndex::build(first, second, max_transfer);
    // The inner `move` closures copy these borrows rather than the owners
    let (transfers, alightings) = (transfers.points(), alightings.as_slice());

    let combinations = boardings.iter().flat_map(|board| {
        transfers
            .iter()
            .filter(move |change| change.from_index >= board.index)
            .flat_map(move |change| {
                alightings
                    .iter()
                    .filter(move |alight| alight.index >= change.to_index)
                    .map(move |alight| {
                        let walking = board.walk + change.distance + alight.walk;
                        let total = board.walk
                            + first.in_line_distance(board.index, change.from_index)
                            + change.distance
                            + second.in_line_distance(change.to_index, alight.index)
                            + alight.walk;
                        (Cost { total, walking }, (*board, *change, *alight))
                    })
            })
    });

    let (cost, (board, change, alight)) = shortest(combinations)?;
    debug!(
        first = %first.id(),
        second = %second.id(),
        total = cost.total,
        "one-transfer itinerary found"
    );

    Itinerary::by_bus(vec![
        RouteSegment::on_line(first, board.index, change.from_index, board.walk, half(&change)),
        RouteSegment::on_line(second, change.to_index, alight.index, half(&change), alight.walk),
    ])
    .ok()
}

/// Half of a transfer walk, attributed to each side of the change.
pub(super) fn half(change: &TransferPoint) -> f64 {
    change.distance / 2.0
}
