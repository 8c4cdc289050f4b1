//! Two-transfer search composing three lines.
//!
//! This is the fallback tier and by far the most expensive: cubic in the
//! number of lines, and for each triple it enumerates boarding stops times
//! both transfer lists times alighting stops.

use tracing::debug;

use crate::domain::{GeoPoint, Itinerary, RouteSegment, TransitLine};

use super::scan::{Cost, shortest, walkable_stops};
use super::single_transfer::half;
use super::transfer_index::TransferPointIndex;

/// Find the shortest itinerary riding `first`, then `second`, then `third`.
///
/// The ride on `second` must run forwards: the stop where it is joined must
/// not come after the stop where it is left.
pub(super) fn find_double_transfer(
    first: &TransitLine,
    second: &TransitLine,
    third: &TransitLine,
    origin: &GeoPoint,
    destination: &GeoPoint,
    max_walk: f64,
    max_transfer: f64,
) -> Option<Itinerary> {
    let first_to_second = TransferPointIndex::build(first, second, max_transfer);
    let second_to_third = TransferPointIndex::build(second, third, max_transfer);
    if first_to_second.is_empty() || second_to_third.is_empty() {
        return None;
    }

    let boardings = walkable_stops(first, origin, max_walk);
    let alightings = walkable_stops(third, destination, max_walk);
    if boardings.is_empty() || alightings.is_empty() {
        return None;
    }
    let (first_to_second, second_to_third) = (first_to_second.points(), second_to_third.points());
    let alightings = alightings.as_slice();

    let combinations = boardings.iter().flat_map(|board| {
        first_to_second
            .iter()
            .filter(move |change1| change1.from_index >= board.index)
            .flat_map(move |change1| {
                second_to_third
                    .iter()
                    .filter(move |change2| change1.to_index <= change2.from_index)
                    .flat_map(move |change2| {
                        alightings
                            .iter()
                            .filter(move |alight| alight.index >= change2.to_index)
                            .map(move |alight| {
                                let walking =
                                    board.walk + change1.distance + change2.distance + alight.walk;
                                let riding = first.in_line_distance(board.index, change1.from_index)
                                    + second.in_line_distance(change1.to_index, change2.from_index)
                                    + third.in_line_distance(change2.to_index, alight.index);
                                let cost = Cost {
                                    total: walking + riding,
                                    walking,
                                };
                                (cost, (*board, *change1, *change2, *alight))
                            })
                    })
            })
    });

    let (cost, (board, change1, change2, alight)) = shortest(combinations)?;
    debug!(
        first = %first.id(),
        second = %second.id(),
        third = %third.id(),
        total = cost.total,
        "two-transfer itinerary found"
    );

    Itinerary::by_bus(vec![
        RouteSegment::on_line(first, board.index, change1.from_index, board.walk, half(&change1)),
        RouteSegment::on_line(
            second,
            change1.to_index,
            change2.from_index,
            half(&change1),
            half(&change2),
        ),
        RouteSegment::on_line(third, change2.to_index, alight.index, half(&change2), alight.walk),
    ])
    .ok()
}
