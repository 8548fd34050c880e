//! Point type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A coordinate pair.
///
/// For geographic data `x` is the longitude and `y` the latitude, both in
/// degrees. For planar data both are in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate (longitude).
    pub x: f64,
    /// Y coordinate (latitude).
    pub y: f64,
}

impl Point {
    /// Create a new Point.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Create a Point from a longitude/latitude pair in degrees.
    #[inline]
    pub fn from_lon_lat(lon: f64, lat: f64) -> Self {
        Self { x: lon, y: lat }
    }

    /// True when both coordinates are finite numbers.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<[f64; 2]> for Point {
    #[inline]
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    #[inline]
    fn from(point: Point) -> Self {
        [point.x, point.y]
    }
}
