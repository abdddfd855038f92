//! GeoJSON payload types as served by tile endpoints
//!
//! Geometry is kept loosely typed: the type tag is an open string and the
//! coordinates stay raw JSON, so unknown or unsupported geometries still
//! decode and are rejected later, by the classifier, with a precise error.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Property bag of a feature, shared between the payload and converted output
pub type Properties = Arc<Map<String, Value>>;

/// Geometry of a raw feature: type tag plus untouched coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Value,
}

impl RawGeometry {
    pub fn point(x: f64, y: f64) -> Self {
        Self {
            kind: "Point".to_string(),
            coordinates: Value::from(vec![x, y]),
        }
    }

    /// First two coordinate values as `(x, y)`, if both are numbers
    pub fn first_pair(&self) -> Option<(f64, f64)> {
        let values = self.coordinates.as_array()?;
        let x = values.first()?.as_f64()?;
        let y = values.get(1)?.as_f64()?;
        Some((x, y))
    }
}

/// GeoJSON feature as received from the network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFeature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub geometry: RawGeometry,
    #[serde(default)]
    pub properties: Option<Properties>,
}

impl RawFeature {
    pub fn new(geometry: RawGeometry) -> Self {
        Self {
            id: None,
            geometry,
            properties: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<Value>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_properties(mut self, properties: Map<String, Value>) -> Self {
        self.properties = Some(Arc::new(properties));
        self
    }
}

/// Root object of a tile payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<RawFeature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<RawFeature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Decodes a response body; a JSON `null` body means the tile has no payload
pub fn decode_payload(body: &[u8]) -> crate::Result<Option<FeatureCollection>> {
    Ok(serde_json::from_slice(body)?)
}
