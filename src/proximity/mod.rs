//! Proximity tracking for the draggable marker.
//!
//! The [`ProximityController`] owns the marker, re-queries the spatial index on
//! every move and pushes the resulting [`ProximityState`] to its listeners.
//! [`LevelStyle`] holds the default presentation for each level.

mod controller;
mod level;
mod state;
mod style;

pub use controller::{ListenerId, ProximityController};
pub use level::ProximityLevel;
pub use state::ProximityState;
pub use style::{LevelStyle, Rgba};
