//! # vectorgrid
//!
//! Fetches GeoJSON tiles from a templated URL and converts their features
//! into vector-tile layers in tile-local integer space, ready for a map
//! renderer.
//!
//! The crate is headless: a host supplies the viewport through
//! [`ViewportProvider`] and may swap the network layer through
//! [`TileTransport`].

pub mod core;
pub mod data;
pub mod prelude;
pub mod tiles;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::GridSourceOptions,
    geo::{Crs, LatLng, LatLngBounds, Point, TileCoord},
    viewport::{SharedViewport, Viewport, ViewportProvider},
};

pub use data::{
    classify::{classify, FeatureKind},
    conversion::ConversionPolicy,
    projection::CoordinateSystem,
    vector::{ConvertedFeature, ProjectedPoint, TileLayer, TileResult},
};

pub use tiles::{
    grid::{fetch_tiles, GeoJsonGridSource, GridSource},
    transport::{HttpTransport, RequestOptions, TileTransport},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported geometry type: {0}")]
    UnsupportedGeometry(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Installs `env_logger`, honouring `RUST_LOG`. Safe to call more than once.
#[cfg(feature = "debug")]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(cfg!(test)).try_init();
}

/// No-op without the `debug` feature; the host installs its own logger.
#[cfg(not(feature = "debug"))]
pub fn init_logger() {}
