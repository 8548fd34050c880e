//! Points of interest and the GeoJSON loader that produces them.

mod geojson;
mod point_of_interest;

pub use geojson::{parse_feature_collection, points_from_positions};
pub use point_of_interest::{PoiId, PointOfInterest};
