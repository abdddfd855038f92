use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Geometry kind tag of the vector-tile feature model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureKind {
    Point = 1,
    LineString = 2,
    Polygon = 3,
}

impl FeatureKind {
    /// Integer code stored on converted features
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Maps a GeoJSON geometry type to its feature kind.
///
/// Anything that is not a (multi) line or polygon counts as a point.
pub fn classify(geometry_type: &str) -> FeatureKind {
    match geometry_type {
        "Polygon" | "MultiPolygon" => FeatureKind::Polygon,
        "LineString" | "MultiLineString" => FeatureKind::LineString,
        _ => FeatureKind::Point,
    }
}

/// Classifies a geometry the converter can handle: only `Point` is accepted
pub fn classify_supported(geometry_type: &str) -> Result<FeatureKind> {
    if geometry_type != "Point" {
        return Err(Error::UnsupportedGeometry(geometry_type.to_string()));
    }
    Ok(classify(geometry_type))
}
