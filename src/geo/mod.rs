//! Coordinates and the session-wide metric projection.
//!
//! Points of interest and the marker arrive as longitude/latitude pairs (or as
//! already-metric planar coordinates). Distances are only meaningful once both
//! sides are mapped into the same metric plane, so every spatial query goes
//! through a single [`Projection`] chosen when the index is created.

mod point;
mod projection;

pub use point::Point;
pub use projection::{LEGACY_METERS_PER_DEGREE, Projection};
