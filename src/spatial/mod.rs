//! Spatial indexing for radius counting and hit testing.
//!
//! This module provides an R-tree based index over the point-of-interest set,
//! stored in projected metric coordinates.

mod rtree;

pub use rtree::SpatialIndex;
