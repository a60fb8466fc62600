/// Geographic coordinate and line helpers.
/// All coordinate math uses f64.
use serde::{Deserialize, Serialize};

/// A point in geographic coordinates, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Longitude, -180 to +180.
    pub lon: f64,
    /// Latitude, -90 to +90.
    pub lat: f64,
}

impl Coordinate {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn distance_to(self, other: Coordinate) -> f64 {
        (self.lon - other.lon).hypot(self.lat - other.lat)
    }
}

/// Position of `point` along the line `start`→`end`, as the ratio of its
/// distance from `start` to the line length. Not clamped; None for a
/// zero-length line.
pub fn transect_fraction(point: Coordinate, start: Coordinate, end: Coordinate) -> Option<f64> {
    let length = start.distance_to(end);
    if length <= f64::EPSILON {
        return None;
    }
    Some(point.distance_to(start) / length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_along_line() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(4.0, 3.0);
        let mid = Coordinate::new(2.0, 1.5);
        assert!((transect_fraction(mid, a, b).unwrap() - 0.5).abs() < 1e-12);
        assert!((transect_fraction(b, a, b).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_line_has_no_fraction() {
        let a = Coordinate::new(1.0, 1.0);
        assert!(transect_fraction(Coordinate::new(2.0, 2.0), a, a).is_none());
    }
}
