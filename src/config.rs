//! Controller configuration.

use serde::Deserialize;

use crate::error::{ProximityError, ProximityResult};
use crate::geo::{Point, Projection};

/// Configuration for the proximity controller.
///
/// Every field has a default, so a host may pass a partial object.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProximityConfig {
    /// Radius in meters (in coordinate units for a planar projection)
    /// (default: 100.0).
    pub radius: f64,
    /// Coordinate to metric conversion for the whole session
    /// (default: equirectangular at Bern's latitude).
    pub projection: Projection,
    /// Where the marker sits before the first move (default: Bern).
    pub home: Point,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            radius: 100.0,
            projection: Projection::default(),
            home: Point::from_lon_lat(7.440480, 46.948837),
        }
    }
}

impl ProximityConfig {
    pub fn validate(&self) -> ProximityResult<()> {
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(ProximityError::InvalidConfig(format!(
                "radius must be a non-negative number, got {}",
                self.radius
            )));
        }
        if !self.home.is_finite() {
            return Err(ProximityError::InvalidConfig(format!(
                "home position must be finite, got {}",
                self.home
            )));
        }
        self.projection.validate()
    }
}
