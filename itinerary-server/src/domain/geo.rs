//! Geographic points and great-circle distance.

use std::fmt;
use std::str::FromStr;

/// Mean Earth radius in meters (IUGG).
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Error returned when a coordinate is out of range or cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoordinate {
    reason: &'static str,
}

impl InvalidCoordinate {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A WGS84 position in decimal degrees.
///
/// Latitude is always finite and within [-90, 90], longitude finite and
/// within [-180, 180]. Any `GeoPoint` value is valid by construction.
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::GeoPoint;
///
/// let guelmim = GeoPoint::new(28.9865, -10.0572).unwrap();
/// assert_eq!(guelmim.latitude(), 28.9865);
///
/// // Degree notation with hemispheres is accepted too
/// let parsed: GeoPoint = "28.9865° N, 10.0572° W".parse().unwrap();
/// assert_eq!(parsed, guelmim);
///
/// assert!(GeoPoint::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Create a point, validating both components.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinate::new(
                "latitude must be finite and within [-90, 90]",
            ));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinate::new(
                "longitude must be finite and within [-180, 180]",
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in decimal degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in meters.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        distance(self, other)
    }

    /// Returns true if `other` lies within `max_meters` of this point.
    pub fn is_near(&self, other: &GeoPoint, max_meters: f64) -> bool {
        self.distance_to(other) <= max_meters
    }
}

/// Haversine distance between two points in meters.
///
/// Exactly symmetric and exactly zero for identical points: the deltas are
/// taken as absolute values so argument order never changes the rounding.
pub fn distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let delta_lat = (b.latitude - a.latitude).abs().to_radians();
    let delta_lon = (b.longitude - a.longitude).abs().to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (delta_lon / 2.0).sin().powi(2);

    // Rounding can push h a hair above 1 for antipodal points
    2.0 * EARTH_RADIUS_M * h.min(1.0).sqrt().asin()
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

impl FromStr for GeoPoint {
    type Err = InvalidCoordinate;

    /// Parse `"lat, lon"` in signed decimal degrees, or the hemisphere form
    /// `"28.9865° N, 10.0572° W"`, optionally wrapped in brackets.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned: String = s
            .chars()
            .filter(|c| !matches!(c, '°' | '[' | ']'))
            .collect();

        let mut parts = cleaned.split(',');
        let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(InvalidCoordinate::new(
                "expected two comma-separated components",
            ));
        };

        let latitude = parse_component(lat, 'N', 'S')?;
        let longitude = parse_component(lon, 'E', 'W')?;
        GeoPoint::new(latitude, longitude)
    }
}

/// Parse one component, applying a trailing hemisphere letter if present.
fn parse_component(raw: &str, positive: char, negative: char) -> Result<f64, InvalidCoordinate> {
    let raw = raw.trim();

    let (number, sign) =
        if let Some(rest) = raw.strip_suffix(|c: char| c.eq_ignore_ascii_case(&negative)) {
            (rest, -1.0)
        } else if let Some(rest) = raw.strip_suffix(|c: char| c.eq_ignore_ascii_case(&positive)) {
            (rest, 1.0)
        } else {
            (raw, 1.0)
        };

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| InvalidCoordinate::new("component is not a number"))?;

    Ok(sign * value)
}
