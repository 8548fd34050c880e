//! ProximityController - marker tracking and listener notification.
//!
//! The controller is a two-state machine:
//! - **Idle**: no state computed yet (initial, and after a failed load)
//! - **Tracking**: the last computed [`ProximityState`] is cached
//!
//! Every successful `move_to` enters or stays in Tracking and notifies all
//! listeners synchronously, in registration order, before returning.

use std::fmt;

use super::ProximityState;
use crate::config::ProximityConfig;
use crate::error::{DataLoadError, ProximityError, ProximityResult};
use crate::geo::Point;
use crate::poi::{PointOfInterest, parse_feature_collection, points_from_positions};
use crate::spatial::SpatialIndex;

/// Handle returned by [`ProximityController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u32);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({})", self.0)
    }
}

type Listener = Box<dyn FnMut(&ProximityState)>;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Tracking(ProximityState),
}

/// Tracks the marker and keeps listeners up to date.
pub struct ProximityController {
    /// Points of interest, queried on every move
    index: SpatialIndex,

    /// Fixed "nearby" threshold in meters
    radius: f64,

    /// Marker position before the first move
    home: Point,

    /// Current marker position (last write wins)
    marker: Point,

    phase: Phase,

    /// Registered listeners in subscription order
    listeners: Vec<(ListenerId, Listener)>,

    /// Next listener ID to assign
    next_listener_id: u32,
}

impl ProximityController {
    /// Create an Idle controller with an empty, not-loaded index.
    pub fn new(config: ProximityConfig) -> ProximityResult<Self> {
        config.validate()?;
        Ok(Self {
            index: SpatialIndex::new(config.projection),
            radius: config.radius,
            home: config.home,
            marker: config.home,
            phase: Phase::Idle,
            listeners: Vec::new(),
            next_listener_id: 0,
        })
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Replace the point-of-interest set.
    ///
    /// When already tracking, the state is recomputed at the current marker
    /// and listeners are notified. On failure the index is reset and the
    /// controller falls back to Idle until a fresh load succeeds.
    pub fn load(&mut self, points: Vec<PointOfInterest>) -> ProximityResult<usize> {
        match self.index.load(points) {
            Ok(count) => {
                log::info!("loaded {count} points of interest");
                if self.is_tracking() {
                    self.move_to(self.marker)?;
                }
                Ok(count)
            }
            Err(err) => Err(self.fail_load(err)),
        }
    }

    /// Parse a GeoJSON `FeatureCollection` and load its point features.
    pub fn load_geojson(&mut self, text: &str) -> ProximityResult<usize> {
        self.load_parsed(parse_feature_collection(text))
    }

    /// Load anonymous points from `[x0, y0, x1, y1, ...]`.
    pub fn load_positions(&mut self, positions: &[f64]) -> ProximityResult<usize> {
        self.load_parsed(points_from_positions(positions))
    }

    fn load_parsed(
        &mut self,
        parsed: Result<Vec<PointOfInterest>, DataLoadError>,
    ) -> ProximityResult<usize> {
        match parsed {
            Ok(points) => self.load(points),
            Err(err) => {
                self.index.reset();
                Err(self.fail_load(err.into()))
            }
        }
    }

    fn fail_load(&mut self, err: ProximityError) -> ProximityError {
        log::error!("{err}");
        self.phase = Phase::Idle;
        err
    }

    // =========================================================================
    // Tracking
    // =========================================================================

    /// Move the marker and recompute the proximity state.
    ///
    /// Fails with [`ProximityError::NotReady`] before the first successful
    /// load. In that case the marker still moves, the controller stays Idle
    /// and no listener is called.
    pub fn move_to(&mut self, point: Point) -> ProximityResult<ProximityState> {
        self.marker = point;
        let count = self.index.count_within(point, self.radius)?;
        let state = ProximityState::from_count(count);

        self.phase = Phase::Tracking(state);
        for (_, listener) in self.listeners.iter_mut() {
            listener(&state);
        }
        Ok(state)
    }

    /// Register a listener called on every state change.
    pub fn subscribe(&mut self, listener: impl FnMut(&ProximityState) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener.
    ///
    /// Returns true if the listener was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The last computed state, or None while Idle.
    pub fn state(&self) -> Option<ProximityState> {
        match self.phase {
            Phase::Idle => None,
            Phase::Tracking(state) => Some(state),
        }
    }

    /// True after a successful `move_to` on the loaded set.
    pub fn is_tracking(&self) -> bool {
        matches!(self.phase, Phase::Tracking(_))
    }

    /// True once the point-of-interest set has been loaded.
    pub fn is_ready(&self) -> bool {
        self.index.is_loaded()
    }

    /// Last position passed to `move_to`, or `home` before any move.
    pub fn marker(&self) -> Point {
        self.marker
    }

    /// Starting marker position from the config.
    pub fn home(&self) -> Point {
        self.home
    }

    /// Proximity radius in meters of the projected plane.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// The loaded point-of-interest index.
    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Points of interest currently within the radius of the marker.
    pub fn nearby(&self) -> ProximityResult<Vec<&PointOfInterest>> {
        Ok(self
            .index
            .within(self.marker, self.radius)?
            .into_iter()
            .filter_map(|id| self.index.get(id))
            .collect())
    }

    /// The point of interest closest to `position`, if within `tolerance`.
    pub fn point_at(&self, position: Point, tolerance: f64) -> ProximityResult<Option<&PointOfInterest>> {
        Ok(self
            .index
            .nearest_within(position, tolerance)?
            .and_then(|id| self.index.get(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Projection;
    use crate::poi::PoiId;
    use crate::proximity::ProximityLevel;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn planar_config(radius: f64) -> ProximityConfig {
        ProximityConfig {
            radius,
            projection: Projection::Planar,
            home: Point::new(0.0, 0.0),
        }
    }

    fn points(positions: &[(f64, f64)]) -> Vec<PointOfInterest> {
        positions
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| PointOfInterest::new(PoiId(i as u32), Point::new(x, y)))
            .collect()
    }

    fn recorder(controller: &mut ProximityController) -> Rc<RefCell<Vec<ProximityState>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        controller.subscribe(move |state| sink.borrow_mut().push(*state));
        seen
    }

    #[test]
    fn test_starts_idle_at_home() {
        let controller = ProximityController::new(ProximityConfig::default()).unwrap();
        assert!(!controller.is_tracking());
        assert!(!controller.is_ready());
        assert_eq!(controller.state(), None);
        assert_eq!(controller.marker(), controller.home());
        assert_eq!(controller.radius(), 100.0);
    }

    #[test]
    fn test_invalid_config() {
        let result = ProximityController::new(planar_config(-5.0));
        assert!(matches!(result, Err(ProximityError::InvalidConfig(_))));
    }

    #[test]
    fn test_not_ready_rejects_without_notifying() {
        let mut controller = ProximityController::new(planar_config(100.0)).unwrap();
        let seen = recorder(&mut controller);

        let result = controller.move_to(Point::new(3.0, 4.0));
        assert!(matches!(result, Err(ProximityError::NotReady)));
        assert!(!controller.is_tracking());
        assert_eq!(controller.marker(), Point::new(3.0, 4.0));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_empty_set_any_position() {
        let mut controller = ProximityController::new(planar_config(100.0)).unwrap();
        controller.load(Vec::new()).unwrap();

        for position in [Point::new(0.0, 0.0), Point::new(-1e6, 42.0)] {
            let state = controller.move_to(position).unwrap();
            assert_eq!(state.count, 0);
            assert_eq!(state.level, ProximityLevel::Empty);
        }
    }

    #[test]
    fn test_mixed_distances() {
        let mut controller = ProximityController::new(planar_config(100.0)).unwrap();
        controller
            .load(points(&[(10.0, 0.0), (0.0, 50.0), (-200.0, 0.0)]))
            .unwrap();

        let state = controller.move_to(Point::new(0.0, 0.0)).unwrap();
        assert_eq!(state, ProximityState::from_count(2));
        assert_eq!(state.level.as_u8(), 1);
        assert_eq!(controller.state(), Some(state));
    }

    #[test]
    fn test_leaving_radius_fires_once() {
        let mut controller = ProximityController::new(planar_config(100.0)).unwrap();
        controller
            .load(points(&[(10.0, 0.0), (0.0, 50.0), (-30.0, -30.0)]))
            .unwrap();
        controller.move_to(Point::new(0.0, 0.0)).unwrap();

        let seen = recorder(&mut controller);
        let state = controller.move_to(Point::new(5000.0, 5000.0)).unwrap();

        assert_eq!(state.count, 0);
        assert_eq!(state.level, ProximityLevel::Empty);
        assert_eq!(*seen.borrow(), vec![state]);
    }

    #[test]
    fn test_seven_points_saturate() {
        let mut controller = ProximityController::new(planar_config(100.0)).unwrap();
        let positions: Vec<_> = (0..7).map(|i| (i as f64 * 10.0, 0.0)).collect();
        controller.load(points(&positions)).unwrap();

        let state = controller.move_to(Point::new(0.0, 0.0)).unwrap();
        assert_eq!(state.count, 7);
        assert_eq!(state.level, ProximityLevel::Saturated);
    }

    #[test]
    fn test_repeated_move_is_idempotent() {
        let mut controller = ProximityController::new(planar_config(100.0)).unwrap();
        controller
            .load(points(&[(10.0, 0.0), (20.0, 0.0), (30.0, 0.0)]))
            .unwrap();
        let seen = recorder(&mut controller);

        controller.move_to(Point::new(1.0, 1.0)).unwrap();
        controller.move_to(Point::new(1.0, 1.0)).unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], seen[1]);
    }

    #[test]
    fn test_listeners_in_registration_order() {
        let mut controller = ProximityController::new(planar_config(100.0)).unwrap();
        controller.load(points(&[(0.0, 0.0)])).unwrap();

        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in ["icon", "label", "tint"] {
            let order = Rc::clone(&order);
            controller.subscribe(move |_| order.borrow_mut().push(tag));
        }

        controller.move_to(Point::new(0.0, 0.0)).unwrap();
        assert_eq!(*order.borrow(), vec!["icon", "label", "tint"]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut controller = ProximityController::new(planar_config(100.0)).unwrap();
        controller.load(points(&[(0.0, 0.0)])).unwrap();

        let kept = recorder(&mut controller);
        let dropped = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&dropped);
        let id = controller.subscribe(move |_| *counter.borrow_mut() += 1);

        controller.move_to(Point::new(0.0, 0.0)).unwrap();
        assert!(controller.unsubscribe(id));
        assert!(!controller.unsubscribe(id));
        controller.move_to(Point::new(1.0, 0.0)).unwrap();

        assert_eq!(*dropped.borrow(), 1);
        assert_eq!(kept.borrow().len(), 2);
        assert_eq!(controller.listener_count(), 1);
    }

    #[test]
    fn test_reload_while_tracking_refreshes() {
        let mut controller = ProximityController::new(planar_config(100.0)).unwrap();
        controller.load(points(&[(0.0, 0.0)])).unwrap();
        controller.move_to(Point::new(0.0, 0.0)).unwrap();
        let seen = recorder(&mut controller);

        controller
            .load(points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]))
            .unwrap();

        assert_eq!(controller.state(), Some(ProximityState::from_count(3)));
        assert_eq!(*seen.borrow(), vec![ProximityState::from_count(3)]);
    }

    #[test]
    fn test_load_while_idle_stays_idle() {
        let mut controller = ProximityController::new(planar_config(100.0)).unwrap();
        let seen = recorder(&mut controller);
        controller.load(points(&[(0.0, 0.0)])).unwrap();

        assert!(controller.is_ready());
        assert!(!controller.is_tracking());
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_failed_load_makes_controller_unusable() {
        crate::logging::init_test_logger();
        let mut controller = ProximityController::new(planar_config(100.0)).unwrap();
        controller.load(points(&[(0.0, 0.0)])).unwrap();
        controller.move_to(Point::new(0.0, 0.0)).unwrap();

        let err = controller.load_geojson("{ broken").unwrap_err();
        assert!(matches!(err, ProximityError::DataLoad(DataLoadError::Json(_))));
        assert!(!controller.is_ready());
        assert_eq!(controller.state(), None);
        assert!(matches!(
            controller.move_to(Point::new(0.0, 0.0)),
            Err(ProximityError::NotReady)
        ));

        // A fresh load recovers
        controller.load(points(&[(0.0, 0.0)])).unwrap();
        assert_eq!(controller.move_to(Point::new(0.0, 0.0)).unwrap().count, 1);
    }

    #[test]
    fn test_load_positions() {
        let mut controller = ProximityController::new(planar_config(100.0)).unwrap();
        assert_eq!(controller.load_positions(&[0.0, 0.0, 50.0, 0.0, 500.0, 0.0]).unwrap(), 3);
        assert_eq!(controller.move_to(Point::new(0.0, 0.0)).unwrap().count, 2);

        let err = controller.load_positions(&[1.0]).unwrap_err();
        assert!(matches!(
            err,
            ProximityError::DataLoad(DataLoadError::OddPositionCount(1))
        ));
        assert!(!controller.is_ready());
        assert!(!controller.is_tracking());
    }

    #[test]
    fn test_nearby_and_point_at() {
        let mut controller = ProximityController::new(planar_config(100.0)).unwrap();
        let mut pois = points(&[(10.0, 0.0), (90.0, 0.0), (300.0, 0.0)]);
        pois[2] = pois[2].clone().with_name("Far Café");
        controller.load(pois).unwrap();

        let nearby: Vec<_> = controller.nearby().unwrap().iter().map(|p| p.id).collect();
        assert_eq!(nearby, vec![PoiId(0), PoiId(1)]);

        let hit = controller.point_at(Point::new(298.0, 1.0), 5.0).unwrap();
        assert_eq!(hit.and_then(|p| p.name.as_deref()), Some("Far Café"));
        assert!(controller.point_at(Point::new(200.0, 0.0), 5.0).unwrap().is_none());
    }
}
