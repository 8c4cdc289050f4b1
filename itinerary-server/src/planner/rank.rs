//! Itinerary ranking for search results.
//!
//! Orders candidates so the least walking comes first.

use std::cmp::Ordering;

use crate::domain::Itinerary;

/// Compare two itineraries by preference.
///
/// Itineraries are compared by:
/// 1. Total walking distance (less is better)
/// 2. Number of transfers (fewer is better)
/// 3. Total distance (shorter is better)
pub fn compare_itineraries(a: &Itinerary, b: &Itinerary) -> Ordering {
    a.total_walking()
        .total_cmp(&b.total_walking())
        .then_with(|| a.transfer_count().cmp(&b.transfer_count()))
        .then_with(|| a.total_distance().total_cmp(&b.total_distance()))
}

/// Rank itineraries by preference, best first.
///
/// The sort is stable: itineraries that compare equal keep their input
/// order. Near-identical itineraries are all kept.
pub fn rank_itineraries(mut itineraries: Vec<Itinerary>) -> Vec<Itinerary> {
    itineraries.sort_by(compare_itineraries);
    itineraries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GeoPoint, LineId, RouteSegment, Stop, TransitLine};

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    fn line(id: &str, length_deg: f64) -> TransitLine {
        TransitLine::new(
            LineId::new(id).unwrap(),
            None,
            vec![
                Stop::new("start", point(0.0, 0.0)),
                Stop::new("end", point(0.0, length_deg)),
            ],
        )
    }

    /// An itinerary of `legs` rides on `line`, each walking `walk` on both sides.
    fn make_itinerary(id: &str, legs: usize, walk: f64, length_deg: f64) -> Itinerary {
        let l = line(id, length_deg);
        let segments = (0..legs)
            .map(|_| RouteSegment::on_line(&l, 0, 1, walk, walk))
            .collect();
        Itinerary::by_bus(segments).unwrap()
    }

    fn ids(itineraries: &[Itinerary]) -> Vec<&str> {
        itineraries
            .iter()
            .map(|i| i.segments()[0].line.id.as_str())
            .collect()
    }

    #[test]
    fn rank_by_walking() {
        let near = make_itinerary("near", 1, 50.0, 0.01);
        let far = make_itinerary("far", 1, 400.0, 0.01);

        let ranked = rank_itineraries(vec![far, near]);
        assert_eq!(ids(&ranked), ["near", "far"]);
    }

    #[test]
    fn rank_by_transfers_when_same_walking() {
        // Two legs with 50 m each side walk the same total as one leg with 100 m
        let one = make_itinerary("one", 1, 100.0, 0.01);
        let two = make_itinerary("two", 2, 50.0, 0.001);

        let ranked = rank_itineraries(vec![two, one]);
        assert_eq!(ids(&ranked), ["one", "two"]);
    }

    #[test]
    fn rank_by_distance_last() {
        let short = make_itinerary("short", 1, 100.0, 0.01);
        let long = make_itinerary("long", 1, 100.0, 0.02);

        let ranked = rank_itineraries(vec![long, short]);
        assert_eq!(ids(&ranked), ["short", "long"]);
    }

    #[test]
    fn walking_itinerary_competes_on_walking() {
        // A 1 km walk loses to a ride with 200 m of walking
        let walk = Itinerary::walking(point(0.0, 0.0), point(0.0, 0.009));
        let ride = make_itinerary("ride", 1, 100.0, 0.01);

        let ranked = rank_itineraries(vec![walk, ride]);
        assert_eq!(ids(&ranked), ["ride", "Walk"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let a = make_itinerary("a", 1, 100.0, 0.01);
        let b = make_itinerary("b", 1, 100.0, 0.01);
        let c = make_itinerary("c", 1, 100.0, 0.01);

        let ranked = rank_itineraries(vec![b, c, a]);
        assert_eq!(ids(&ranked), ["b", "c", "a"]);
    }

    #[test]
    fn near_duplicates_are_kept() {
        let a = make_itinerary("same", 1, 100.0, 0.01);
        let b = make_itinerary("same", 1, 100.000001, 0.01);

        assert_eq!(rank_itineraries(vec![a, b]).len(), 2);
    }

    #[test]
    fn empty_input() {
        assert!(rank_itineraries(vec![]).is_empty());
    }
}
