//! Point-of-interest record.
//!
//! Each point of interest has:
//! - A stable identifier (its slot in the loaded set)
//! - A position (longitude/latitude or planar meters)
//! - Optional name and website shown by the host's popup

use std::fmt;

use serde::Serialize;

use crate::geo::Point;

/// Stable point-of-interest identifier.
///
/// Ids are assigned in load order and stay valid until the next load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PoiId(pub u32);

impl PoiId {
    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PoiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Poi({})", self.0)
    }
}

/// A fixed location of interest, e.g. a café.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterest {
    pub id: PoiId,
    pub position: Point,
    pub name: Option<String>,
    pub website: Option<String>,
}

impl PointOfInterest {
    /// Create an anonymous point of interest.
    pub fn new(id: PoiId, position: Point) -> Self {
        Self {
            id,
            position,
            name: None,
            website: None,
        }
    }
}

#[cfg(test)]
impl PointOfInterest {
    pub(crate) fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub(crate) fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }
}
