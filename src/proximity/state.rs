//! Proximity state emitted to listeners.

use serde::Serialize;

use super::ProximityLevel;

/// Number of points of interest within the radius and the derived level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProximityState {
    pub count: usize,
    pub level: ProximityLevel,
}

impl ProximityState {
    /// Build the state for a count.
    #[inline]
    pub fn from_count(count: usize) -> Self {
        Self {
            count,
            level: ProximityLevel::from_count(count),
        }
    }
}
