//! Precomputed transfer points between two lines.
//!
//! The transfer finders walk every compatible stop pair inside deeply nested
//! loops. Building the list once per line pair keeps the pairwise distance
//! computations out of those loops.

use crate::domain::TransitLine;

/// A stop on the first line close enough to a stop on the second line to walk between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferPoint {
    /// Stop index on the line being left.
    pub from_index: usize,
    /// Stop index on the line being joined.
    pub to_index: usize,
    /// Walk between the two stops in meters.
    pub distance: f64,
}

/// All transfer points from one line to another within a distance threshold.
///
/// Points are ordered by `from_index`, then `to_index`.
#[derive(Debug, Clone, Default)]
pub struct TransferPointIndex {
    points: Vec<TransferPoint>,
}

impl TransferPointIndex {
    /// Compare every stop of `from` with every stop of `to`. O(n·m).
    pub fn build(from: &TransitLine, to: &TransitLine, max_transfer: f64) -> Self {
        let points = from
            .stops()
            .iter()
            .enumerate()
            .flat_map(|(from_index, a)| {
                to.stops()
                    .iter()
                    .enumerate()
                    .filter_map(move |(to_index, b)| {
                        let distance = a.position.distance_to(&b.position);
                        (distance <= max_transfer).then_some(TransferPoint {
                            from_index,
                            to_index,
                            distance,
                        })
                    })
            })
            .collect();

        Self { points }
    }

    pub fn points(&self) -> &[TransferPoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}
