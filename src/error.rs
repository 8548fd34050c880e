//! Error types shared by the index, the controller and the WASM API.

use thiserror::Error;

/// The point-of-interest source could not be turned into a point set.
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("feature {feature} has an invalid coordinate")]
    InvalidCoordinate { feature: usize },
    #[error("positions array has odd length {0}, expected [x0, y0, x1, y1, ...]")]
    OddPositionCount(usize),
}

#[derive(Error, Debug)]
pub enum ProximityError {
    #[error("failed to load points of interest: {0}")]
    DataLoad(#[from] DataLoadError),
    #[error("points of interest have not been loaded yet")]
    NotReady,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type ProximityResult<T> = std::result::Result<T, ProximityError>;
