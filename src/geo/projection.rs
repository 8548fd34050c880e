//! Coordinate to metric-plane conversion.
//!
//! Raw degree differences are not distances: one degree of longitude shrinks
//! with latitude. A [`Projection`] maps every point into a local plane where
//! Euclidean distance is in meters, and the same projection is applied to the
//! indexed points and to every query center for the whole session.

use serde::{Deserialize, Serialize};

use super::Point;
use crate::error::{ProximityError, ProximityResult};

/// Mean Earth radius in meters (IUGG).
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Meters per degree of the legacy Bern approximation.
pub const LEGACY_METERS_PER_DEGREE: f64 = 74_000.0;

/// Reference latitude of the default home position (Bern).
const BERN_LATITUDE: f64 = 46.948837;

/// How coordinates are converted into a metric plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Projection {
    /// Coordinates are already metric.
    Planar,
    /// Local equirectangular projection around a fixed reference latitude.
    ///
    /// Accurate to well under a percent across a city, which is the scale
    /// the proximity radius works at.
    Equirectangular { reference_latitude: f64 },
    /// Both axes scaled by one constant, ignoring latitude.
    ///
    /// The legacy `RADIUS / 74000` degrees threshold. Only right near one
    /// latitude and along one axis.
    DegreeScale { meters_per_degree: f64 },
}

impl Default for Projection {
    fn default() -> Self {
        Projection::Equirectangular {
            reference_latitude: BERN_LATITUDE,
        }
    }
}

impl Projection {
    /// Reject parameters that would make distances meaningless.
    pub fn validate(&self) -> ProximityResult<()> {
        match *self {
            Projection::Planar => Ok(()),
            Projection::Equirectangular { reference_latitude } => {
                if reference_latitude.is_finite() && reference_latitude.abs() < 90.0 {
                    Ok(())
                } else {
                    Err(ProximityError::InvalidConfig(format!(
                        "reference latitude must be within (-90, 90), got {reference_latitude}"
                    )))
                }
            }
            Projection::DegreeScale { meters_per_degree } => {
                if meters_per_degree.is_finite() && meters_per_degree > 0.0 {
                    Ok(())
                } else {
                    Err(ProximityError::InvalidConfig(format!(
                        "meters per degree must be positive, got {meters_per_degree}"
                    )))
                }
            }
        }
    }

    /// Map a point into the metric plane.
    #[inline]
    pub fn project(&self, point: Point) -> [f64; 2] {
        match *self {
            Projection::Planar => [point.x, point.y],
            Projection::Equirectangular { reference_latitude } => {
                let scale_x = reference_latitude.to_radians().cos();
                [
                    EARTH_RADIUS_M * point.x.to_radians() * scale_x,
                    EARTH_RADIUS_M * point.y.to_radians(),
                ]
            }
            Projection::DegreeScale { meters_per_degree } => {
                [point.x * meters_per_degree, point.y * meters_per_degree]
            }
        }
    }

    /// Metric distance between two points.
    pub fn distance(&self, a: Point, b: Point) -> f64 {
        let [ax, ay] = self.project(a);
        let [bx, by] = self.project(b);
        (ax - bx).hypot(ay - by)
    }
}
