//! Vector-tile shaped output handed to the renderer

use crate::core::{
    constants::{GEOJSON_LAYER_NAME, TILE_EXTENT},
    geo::TileCoord,
};
use crate::data::{classify::FeatureKind, geojson::Properties};
use fxhash::FxHashMap as HashMap;
use serde::Serialize;
use serde_json::Value;

/// Position in tile-local space. May fall outside `[0, extent)` near tile edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ProjectedPoint {
    pub x: i64,
    pub y: i64,
}

impl ProjectedPoint {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// A single converted point feature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertedFeature {
    geometry: Vec<ProjectedPoint>,
    /// Same allocation as the source feature's properties
    pub properties: Option<Properties>,
    pub id: Option<Value>,
    #[serde(rename = "type")]
    pub kind: u8,
}

impl ConvertedFeature {
    pub fn point(
        point: ProjectedPoint,
        kind: FeatureKind,
        properties: Option<Properties>,
        id: Option<Value>,
    ) -> Self {
        Self {
            geometry: vec![point],
            properties,
            id,
            kind: kind.code(),
        }
    }

    /// Always exactly one point
    pub fn geometry(&self) -> &[ProjectedPoint] {
        &self.geometry
    }

    pub fn location(&self) -> ProjectedPoint {
        self.geometry[0]
    }
}

/// One named layer of a converted tile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLayer {
    pub name: String,
    pub extent: u32,
    pub features: Vec<ConvertedFeature>,
    /// Number of features in the source payload. Can exceed `features.len()`
    /// when some features were skipped during conversion.
    pub length: usize,
}

impl TileLayer {
    /// The layer every GeoJSON tile is converted into
    pub fn geojson(length: usize) -> Self {
        Self {
            name: GEOJSON_LAYER_NAME.to_string(),
            extent: TILE_EXTENT,
            features: Vec::with_capacity(length),
            length,
        }
    }
}

/// Unit of work handed to the renderer for one tile coordinate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileResult {
    pub layers: HashMap<String, TileLayer>,
    pub coords: TileCoord,
}

impl TileResult {
    /// A result with no layers: stale tile, failed response or missing payload
    pub fn empty(coords: TileCoord) -> Self {
        Self {
            layers: HashMap::default(),
            coords,
        }
    }

    pub fn with_layer(coords: TileCoord, layer: TileLayer) -> Self {
        let mut result = Self::empty(coords);
        result.layers.insert(layer.name.clone(), layer);
        result
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layer(&self, name: &str) -> Option<&TileLayer> {
        self.layers.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geojson_layer_defaults() {
        let layer = TileLayer::geojson(3);
        assert_eq!(layer.name, "geojson");
        assert_eq!(layer.extent, 4096);
        assert_eq!(layer.length, 3);
        assert!(layer.features.is_empty());
    }

    #[test]
    fn test_result_layers() {
        let coords = TileCoord::new(1, 2, 3);
        assert!(TileResult::empty(coords).is_empty());

        let result = TileResult::with_layer(coords, TileLayer::geojson(0));
        assert!(!result.is_empty());
        assert!(result.layer("geojson").is_some());
        assert_eq!(result.coords, coords);
    }

    #[test]
    fn test_feature_serializes_kind_as_type() {
        let feature = ConvertedFeature::point(
            ProjectedPoint::new(10, 20),
            FeatureKind::Point,
            None,
            Some(Value::from("a")),
        );
        let json = serde_json::to_value(&feature).unwrap();

        assert_eq!(json["type"], 1);
        assert_eq!(json["geometry"], serde_json::json!([{ "x": 10, "y": 20 }]));
        assert_eq!(json["id"], "a");
    }
}
