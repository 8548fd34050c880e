//! GeoJSON `FeatureCollection` loader.
//!
//! Only `Point` features become points of interest. Features without geometry
//! or with other geometry types (café buildings exported as polygons, for
//! instance) are skipped. A `Point` whose coordinates are missing or not
//! numbers makes the whole load fail.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::{PoiId, PointOfInterest};
use crate::error::DataLoadError;
use crate::geo::Point;

#[derive(Deserialize)]
#[serde(tag = "type")]
enum Document {
    FeatureCollection { features: Vec<Feature> },
}

#[derive(Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Value,
}

/// Parse a GeoJSON `FeatureCollection` into points of interest.
///
/// Ids are assigned densely in feature order over the kept features.
pub fn parse_feature_collection(text: &str) -> Result<Vec<PointOfInterest>, DataLoadError> {
    let document: Document = serde_json::from_str(text)?;
    let Document::FeatureCollection { features } = document;

    let mut points = Vec::with_capacity(features.len());
    let mut skipped = 0usize;

    for (feature_index, feature) in features.into_iter().enumerate() {
        let Some(geometry) = feature.geometry else {
            skipped += 1;
            continue;
        };
        if geometry.kind != "Point" {
            log::debug!("skipping feature {feature_index} with {} geometry", geometry.kind);
            skipped += 1;
            continue;
        }

        let position = point_coordinates(&geometry.coordinates).ok_or(
            DataLoadError::InvalidCoordinate {
                feature: feature_index,
            },
        )?;

        let id = PoiId(points.len() as u32);
        let properties = feature.properties.unwrap_or_default();
        points.push(PointOfInterest {
            id,
            position,
            name: string_property(&properties, "name"),
            website: string_property(&properties, "website"),
        });
    }

    if skipped > 0 {
        log::debug!("kept {} point features, skipped {skipped}", points.len());
    }

    Ok(points)
}

/// Build anonymous points of interest from `[x0, y0, x1, y1, ...]`.
pub fn points_from_positions(positions: &[f64]) -> Result<Vec<PointOfInterest>, DataLoadError> {
    if positions.len() % 2 != 0 {
        return Err(DataLoadError::OddPositionCount(positions.len()));
    }

    positions
        .chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| {
            let position = Point::new(pair[0], pair[1]);
            if position.is_finite() {
                Ok(PointOfInterest::new(PoiId(i as u32), position))
            } else {
                Err(DataLoadError::InvalidCoordinate { feature: i })
            }
        })
        .collect()
}

/// A GeoJSON position is `[x, y]` with an optional altitude after it.
fn point_coordinates(coordinates: &Value) -> Option<Point> {
    let array = coordinates.as_array()?;
    if array.len() < 2 {
        return None;
    }
    let point = Point::new(array[0].as_f64()?, array[1].as_f64()?);
    point.is_finite().then_some(point)
}

fn string_property(properties: &Map<String, Value>, key: &str) -> Option<String> {
    properties
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_owned)
}
