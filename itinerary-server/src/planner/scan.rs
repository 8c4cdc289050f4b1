//! Helpers shared by the tiered finders.

use crate::domain::{GeoPoint, TransitLine};

/// A stop on a line reachable on foot from some point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct WalkableStop {
    pub index: usize,
    pub walk: f64,
}

/// Stops of `line` within `max_walk` meters of `point`, in line order.
pub(super) fn walkable_stops(line: &TransitLine, point: &GeoPoint, max_walk: f64) -> Vec<WalkableStop> {
    line.stops()
        .iter()
        .enumerate()
        .filter_map(|(index, stop)| {
            let walk = point.distance_to(&stop.position);
            (walk <= max_walk).then_some(WalkableStop { index, walk })
        })
        .collect()
}

/// Distance cost of one candidate combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Cost {
    /// Walking plus riding, in meters.
    pub total: f64,
    /// The walking part of `total`.
    pub walking: f64,
}

impl Cost {
    /// Lower total wins; an exact tie goes to the candidate that walks less.
    fn beats(&self, other: &Cost) -> bool {
        self.total < other.total || (self.total == other.total && self.walking < other.walking)
    }
}

/// Fold candidates down to the cheapest one.
///
/// Among candidates that are equal on both total and walking, the earliest
/// in enumeration order is kept.
pub(super) fn shortest<T>(candidates: impl Iterator<Item = (Cost, T)>) -> Option<(Cost, T)> {
    candidates.fold(None, |best, (cost, candidate)| match best {
        Some((best_cost, _)) if !cost.beats(&best_cost) => best,
        _ => Some((cost, candidate)),
    })
}
