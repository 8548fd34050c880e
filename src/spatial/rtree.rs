//! R-tree based spatial index using the rstar crate.
//!
//! Provides spatial queries for:
//! - Point-in-radius counting (inclusive boundary)
//! - Point-in-radius listing
//! - Nearest point within a tolerance

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::error::{DataLoadError, ProximityError, ProximityResult};
use crate::geo::{Point, Projection};
use crate::poi::{PoiId, PointOfInterest};

/// A point of interest projected into the metric plane.
#[derive(Debug, Clone, Copy, PartialEq)]
struct IndexedPoint {
    id: PoiId,
    position: [f64; 2],
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        dx * dx + dy * dy
    }

    fn contains_point(&self, point: &[f64; 2]) -> bool {
        self.position == *point
    }
}

/// Spatial index over the point-of-interest set.
///
/// The index starts out not loaded; queries fail with
/// [`ProximityError::NotReady`] until [`SpatialIndex::load`] succeeds. An
/// empty successful load is a valid, ready index.
pub struct SpatialIndex {
    projection: Projection,
    tree: RTree<IndexedPoint>,
    points: Vec<PointOfInterest>,
    loaded: bool,
}

impl SpatialIndex {
    /// Create a new empty, not-loaded index.
    pub fn new(projection: Projection) -> Self {
        Self {
            projection,
            tree: RTree::new(),
            points: Vec::new(),
            loaded: false,
        }
    }

    /// Replace the working set.
    ///
    /// Ids are reassigned to load order so that `get(id)` is a slot lookup.
    /// On an invalid coordinate the index is reset and stays not loaded.
    pub fn load(&mut self, points: Vec<PointOfInterest>) -> ProximityResult<usize> {
        if let Some(feature) = points.iter().position(|poi| !poi.position.is_finite()) {
            self.reset();
            return Err(DataLoadError::InvalidCoordinate { feature }.into());
        }

        let mut points = points;
        let mut indexed = Vec::with_capacity(points.len());
        for (slot, poi) in points.iter_mut().enumerate() {
            poi.id = PoiId(slot as u32);
            indexed.push(IndexedPoint {
                id: poi.id,
                position: self.projection.project(poi.position),
            });
        }

        self.tree = RTree::bulk_load(indexed);
        self.points = points;
        self.loaded = true;
        Ok(self.points.len())
    }

    /// Drop the working set and return to the not-loaded state.
    pub fn reset(&mut self) {
        self.tree = RTree::new();
        self.points.clear();
        self.loaded = false;
    }

    /// Count the points whose distance to `center` is at most `radius`.
    pub fn count_within(&self, center: Point, radius: f64) -> ProximityResult<usize> {
        self.ensure_loaded()?;
        if radius < 0.0 {
            return Ok(0);
        }
        Ok(self
            .tree
            .locate_within_distance(self.projection.project(center), radius * radius)
            .count())
    }

    /// Find all points within a radius of `center`, in ascending id order.
    pub fn within(&self, center: Point, radius: f64) -> ProximityResult<Vec<PoiId>> {
        self.ensure_loaded()?;
        if radius < 0.0 {
            return Ok(Vec::new());
        }
        let mut ids: Vec<_> = self
            .tree
            .locate_within_distance(self.projection.project(center), radius * radius)
            .map(|point| point.id)
            .collect();
        ids.sort_unstable_by_key(|id| id.raw());
        Ok(ids)
    }

    /// Find the nearest point within a maximum distance.
    pub fn nearest_within(&self, center: Point, max_distance: f64) -> ProximityResult<Option<PoiId>> {
        self.ensure_loaded()?;
        if max_distance < 0.0 {
            return Ok(None);
        }
        let query = self.projection.project(center);
        Ok(self
            .tree
            .locate_within_distance(query, max_distance * max_distance)
            .min_by(|a, b| a.distance_2(&query).total_cmp(&b.distance_2(&query)))
            .map(|point| point.id))
    }

    /// Look up a loaded point of interest.
    pub fn get(&self, id: PoiId) -> Option<&PointOfInterest> {
        self.points.get(id.index())
    }

    /// All loaded points, in id order.
    pub fn points(&self) -> &[PointOfInterest] {
        &self.points
    }

    /// The projection fixed for this index.
    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// True once a load has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Get the number of indexed points.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    fn ensure_loaded(&self) -> ProximityResult<()> {
        if self.loaded {
            Ok(())
        } else {
            Err(ProximityError::NotReady)
        }
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new(Projection::default())
    }
}
