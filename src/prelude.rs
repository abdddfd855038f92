//! Prelude module for common vectorgrid types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use vectorgrid::prelude::*;`

pub use crate::core::{
    config::GridSourceOptions,
    geo::{Crs, LatLng, LatLngBounds, Point, TileCoord},
    viewport::{SharedViewport, Viewport, ViewportProvider},
};

pub use crate::data::{
    classify::{classify, classify_supported, FeatureKind},
    conversion::{ConversionPolicy, FeatureConverter},
    geojson::{FeatureCollection, RawFeature, RawGeometry},
    projection::CoordinateSystem,
    vector::{ConvertedFeature, ProjectedPoint, TileLayer, TileResult},
};

pub use crate::tiles::{
    grid::{fetch_tiles, GeoJsonGridSource, GridSource},
    relevance::is_current,
    source::{RotatingSubdomains, SubdomainSelector, TileSource, UrlTemplate},
    transport::{
        BufferedResponse, Credentials, HttpTransport, RequestOptions, TileResponse, TileTransport,
    },
};

pub use crate::{Error, Result};

pub use std::sync::Arc;

pub use fxhash::FxHashMap as HashMap;
