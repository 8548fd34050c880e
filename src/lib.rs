//! Proximity Radar - WASM Module
//!
//! This module provides the proximity engine behind the interactive café map:
//! a draggable avatar marker, a point-of-interest set loaded from GeoJSON, and
//! a live count of points within a fixed radius of the marker. It is compiled
//! to WebAssembly and exposes a JavaScript-friendly API via wasm-bindgen. Map
//! rendering, tiles and popups stay on the JavaScript side.
//!
//! # Architecture
//!
//! - `geo`: Points and the session-wide metric projection
//! - `poi`: Point-of-interest records and the GeoJSON loader
//! - `spatial`: R-tree spatial index for radius counting and hit testing
//! - `proximity`: Marker tracking, count → level mapping, listeners
//! - `config`: Controller configuration
//! - `logging`: Console logging setup

use js_sys::Function;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod geo;
pub mod logging;
pub mod poi;
pub mod proximity;
pub mod spatial;

pub use config::ProximityConfig;
pub use error::{DataLoadError, ProximityError, ProximityResult};
pub use geo::{Point, Projection};
pub use poi::{PoiId, PointOfInterest};
pub use proximity::{
    LevelStyle, ListenerId, ProximityController, ProximityLevel, ProximityState,
};
pub use spatial::SpatialIndex;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
}

/// Main entry point for the proximity engine.
///
/// This struct wraps the internal ProximityController and provides the public
/// API exposed to JavaScript.
#[wasm_bindgen]
pub struct ProximityRadarWasm {
    controller: ProximityController,
}

#[wasm_bindgen]
impl ProximityRadarWasm {
    /// Create a new engine.
    ///
    /// `config` may be `undefined`/`null` for the defaults, or an object such
    /// as `{ radius: 100, projection: { kind: "equirectangular",
    /// referenceLatitude: 46.95 }, home: { x: 7.44, y: 46.95 } }`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ProximityRadarWasm, JsError> {
        let config = if config.is_undefined() || config.is_null() {
            ProximityConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self {
            controller: ProximityController::new(config)?,
        })
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Load points of interest from GeoJSON `FeatureCollection` text.
    ///
    /// Returns the number of point features loaded.
    #[wasm_bindgen(js_name = loadGeoJson)]
    pub fn load_geojson(&mut self, text: &str) -> Result<u32, JsError> {
        Ok(self.controller.load_geojson(text)? as u32)
    }

    /// Load anonymous points from a Float64Array of positions.
    ///
    /// The positions array should be [x0, y0, x1, y1, ...].
    #[wasm_bindgen(js_name = loadPositions)]
    pub fn load_positions(&mut self, positions: &[f64]) -> Result<u32, JsError> {
        Ok(self.controller.load_positions(positions)? as u32)
    }

    /// Check if the point-of-interest set has been loaded.
    #[wasm_bindgen(js_name = isReady)]
    pub fn is_ready(&self) -> bool {
        self.controller.is_ready()
    }

    /// Get the number of loaded points of interest.
    #[wasm_bindgen(js_name = poiCount)]
    pub fn poi_count(&self) -> u32 {
        self.controller.index().len() as u32
    }

    // =========================================================================
    // Marker
    // =========================================================================

    /// Move the marker, typically on every drag tick.
    ///
    /// Returns `{ count, level }` after all listeners have been called.
    /// Listeners must not call back into this object; see `subscribe`.
    /// Throws if the points of interest have not been loaded yet.
    #[wasm_bindgen(js_name = moveTo)]
    pub fn move_to(&mut self, x: f64, y: f64) -> Result<JsValue, JsError> {
        let state = self.controller.move_to(Point::new(x, y))?;
        Ok(serde_wasm_bindgen::to_value(&state)?)
    }

    /// Register a callback receiving `{ count, level }` on every move.
    ///
    /// Callbacks run synchronously inside `moveTo`, while this object is
    /// still borrowed. Calling back into it from a callback (`nearbyPois()`,
    /// `moveTo()`, ...) fails with wasm-bindgen's recursive use error, which
    /// is logged as a warning and the remaining callbacks still run. Use the
    /// state argument, or defer other calls with `queueMicrotask`.
    ///
    /// Returns an id for `unsubscribe`.
    pub fn subscribe(&mut self, callback: Function) -> u32 {
        let id = self.controller.subscribe(move |state| {
            let value = match serde_wasm_bindgen::to_value(state) {
                Ok(value) => value,
                Err(err) => {
                    log::warn!("failed to convert proximity state: {err}");
                    return;
                }
            };
            if let Err(err) = callback.call1(&JsValue::NULL, &value) {
                log::warn!("proximity listener threw: {err:?}");
            }
        });
        id.0
    }

    /// Remove a callback.
    ///
    /// Returns true if the callback was registered.
    pub fn unsubscribe(&mut self, id: u32) -> bool {
        self.controller.unsubscribe(ListenerId(id))
    }

    /// Get the last computed count, or undefined before the first move.
    pub fn count(&self) -> Option<u32> {
        self.controller.state().map(|state| state.count as u32)
    }

    /// Get the last computed level (0-4), or undefined before the first move.
    pub fn level(&self) -> Option<u8> {
        self.controller.state().map(|state| state.level.as_u8())
    }

    /// True once the marker has been moved with the points loaded.
    #[wasm_bindgen(js_name = isTracking)]
    pub fn is_tracking(&self) -> bool {
        self.controller.is_tracking()
    }

    /// Get the proximity radius.
    pub fn radius(&self) -> f64 {
        self.controller.radius()
    }

    /// Get the marker's current X position (longitude).
    #[wasm_bindgen(js_name = markerX)]
    pub fn marker_x(&self) -> f64 {
        self.controller.marker().x
    }

    /// Get the marker's current Y position (latitude).
    #[wasm_bindgen(js_name = markerY)]
    pub fn marker_y(&self) -> f64 {
        self.controller.marker().y
    }

    /// Get the marker's starting X position (longitude).
    #[wasm_bindgen(js_name = homeX)]
    pub fn home_x(&self) -> f64 {
        self.controller.home().x
    }

    /// Get the marker's starting Y position (latitude).
    #[wasm_bindgen(js_name = homeY)]
    pub fn home_y(&self) -> f64 {
        self.controller.home().y
    }

    // =========================================================================
    // Spatial Queries
    // =========================================================================

    /// Get the points of interest within the radius of the marker.
    ///
    /// Returns an array of `{ id, position: { x, y }, name, website }`.
    #[wasm_bindgen(js_name = nearbyPois)]
    pub fn nearby_pois(&self) -> Result<JsValue, JsError> {
        let nearby = self.controller.nearby()?;
        Ok(serde_wasm_bindgen::to_value(&nearby)?)
    }

    /// Find the point of interest under a click.
    ///
    /// Returns the closest point within `tolerance` meters, or undefined.
    #[wasm_bindgen(js_name = poiAt)]
    pub fn poi_at(&self, x: f64, y: f64, tolerance: f64) -> Result<JsValue, JsError> {
        let hit = self.controller.point_at(Point::new(x, y), tolerance)?;
        Ok(serde_wasm_bindgen::to_value(&hit)?)
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    /// Get the default avatar icon path for a level.
    #[wasm_bindgen(js_name = levelIcon)]
    pub fn level_icon(level: u8) -> Option<String> {
        ProximityLevel::from_u8(level).map(|level| LevelStyle::for_level(level).icon.to_owned())
    }

    /// Get the default counter background (CSS `rgba()`) for a level.
    #[wasm_bindgen(js_name = levelTint)]
    pub fn level_tint(level: u8) -> Option<String> {
        ProximityLevel::from_u8(level).map(|level| LevelStyle::for_level(level).tint.to_css())
    }

    /// Change the console log level ("off", "error", "warn", "info", "debug", "trace").
    #[wasm_bindgen(js_name = setLogLevel)]
    pub fn set_log_level(level: &str) -> Result<(), JsError> {
        logging::init(logging::parse_level(level)?);
        Ok(())
    }
}
