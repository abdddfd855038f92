//! Conversion of decoded GeoJSON payloads into tile layers

use crate::{
    core::{constants::TILE_EXTENT, geo::TileCoord},
    data::{
        classify::classify_supported,
        geojson::{FeatureCollection, RawFeature},
        projection::{tile_space_project, CoordinateSystem},
        vector::{ConvertedFeature, TileLayer},
    },
    Error, Result,
};
use serde::{Deserialize, Serialize};

/// What happens to a tile when one of its features cannot be converted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConversionPolicy {
    /// The whole tile fails, discarding features converted so far
    #[default]
    FailTile,
    /// The feature is logged and left out; the rest of the tile converts
    SkipFeature,
}

/// Converts the features of one tile, in payload order
#[derive(Debug, Clone, Copy)]
pub struct FeatureConverter {
    coords: TileCoord,
    zoom_factor: f64,
    coordinate_system: CoordinateSystem,
    policy: ConversionPolicy,
}

impl FeatureConverter {
    pub fn new(coords: TileCoord, coordinate_system: CoordinateSystem, policy: ConversionPolicy) -> Self {
        Self {
            coords,
            zoom_factor: coords.zoom_factor(),
            coordinate_system,
            policy,
        }
    }

    /// Converts a single feature; only `Point` geometries are accepted
    pub fn convert_feature(&self, feature: &RawFeature) -> Result<ConvertedFeature> {
        let geometry = &feature.geometry;
        let kind = classify_supported(&geometry.kind)?;

        let (x, y) = geometry.first_pair().ok_or_else(|| {
            Error::InvalidCoordinates(format!(
                "point needs two numeric coordinates, got {}",
                geometry.coordinates
            ))
        })?;

        let (x_unit, y_unit) = self.coordinate_system.to_unit(x, y);
        let point = tile_space_project(
            x_unit,
            y_unit,
            TILE_EXTENT,
            self.zoom_factor,
            self.coords.x,
            self.coords.y,
        );

        Ok(ConvertedFeature::point(
            point,
            kind,
            feature.properties.clone(),
            feature.id.clone(),
        ))
    }

    /// Builds the `geojson` layer for a payload.
    ///
    /// `length` always reports the number of source features.
    pub fn convert(&self, payload: &FeatureCollection) -> Result<TileLayer> {
        let mut layer = TileLayer::geojson(payload.len());

        for (index, feature) in payload.features.iter().enumerate() {
            match self.convert_feature(feature) {
                Ok(converted) => layer.features.push(converted),
                Err(e) if self.policy == ConversionPolicy::SkipFeature => {
                    log::warn!(
                        "skipping feature {} of tile {:?}: {}",
                        index,
                        self.coords,
                        e
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Ok(layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{geojson::RawGeometry, projection::unit_to_mercator_x, vector::ProjectedPoint};
    use serde_json::{json, Map};
    use std::sync::Arc;

    fn polygon() -> RawFeature {
        RawFeature::new(RawGeometry {
            kind: "Polygon".to_string(),
            coordinates: json!([[[0.0, 0.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]]),
        })
    }

    #[test]
    fn test_world_center_at_zoom_zero() {
        let converter = FeatureConverter::new(
            TileCoord::new(0, 0, 0),
            CoordinateSystem::WebMercatorMeters,
            ConversionPolicy::FailTile,
        );
        let feature = RawFeature::new(RawGeometry::point(0.0, 0.0)).with_id(42);
        let converted = converter.convert_feature(&feature).unwrap();

        assert_eq!(converted.geometry(), &[ProjectedPoint::new(2048, 2048)]);
        assert_eq!(converted.kind, 1);
        assert_eq!(converted.id, Some(json!(42)));
    }

    #[test]
    fn test_properties_are_shared() {
        let mut properties = Map::new();
        properties.insert("name".to_string(), json!("fountain"));
        let feature = RawFeature::new(RawGeometry::point(0.0, 0.0)).with_properties(properties);

        let converter = FeatureConverter::new(
            TileCoord::new(0, 0, 0),
            CoordinateSystem::WebMercatorMeters,
            ConversionPolicy::FailTile,
        );
        let converted = converter.convert_feature(&feature).unwrap();

        let source = feature.properties.as_ref().unwrap();
        let shared = converted.properties.as_ref().unwrap();
        assert!(Arc::ptr_eq(source, shared));
    }

    #[test]
    fn test_order_is_preserved() {
        let coords = TileCoord::new(0, 0, 1);
        let payload = FeatureCollection::new(
            (0..4)
                .map(|i| RawFeature::new(RawGeometry::point(unit_to_mercator_x(i as f64 / 8.0), 0.0)).with_id(i))
                .collect(),
        );

        let layer = FeatureConverter::new(coords, CoordinateSystem::WebMercatorMeters, ConversionPolicy::FailTile)
            .convert(&payload)
            .unwrap();

        let ids: Vec<_> = layer.features.iter().map(|f| f.id.clone().unwrap()).collect();
        assert_eq!(ids, vec![json!(0), json!(1), json!(2), json!(3)]);
        let xs: Vec<_> = layer.features.iter().map(|f| f.location().x).collect();
        assert_eq!(xs, vec![0, 1024, 2048, 3072]);
    }

    #[test]
    fn test_non_point_fails_whole_tile() {
        let payload = FeatureCollection::new(vec![
            RawFeature::new(RawGeometry::point(0.0, 0.0)),
            RawFeature::new(RawGeometry::point(1.0, 1.0)),
            polygon(),
        ]);
        let converter = FeatureConverter::new(
            TileCoord::new(0, 0, 0),
            CoordinateSystem::WebMercatorMeters,
            ConversionPolicy::FailTile,
        );

        assert!(matches!(
            converter.convert(&payload),
            Err(Error::UnsupportedGeometry(kind)) if kind == "Polygon"
        ));
    }

    #[test]
    fn test_skip_policy_keeps_valid_points() {
        let payload = FeatureCollection::new(vec![
            RawFeature::new(RawGeometry::point(0.0, 0.0)),
            polygon(),
            RawFeature::new(RawGeometry::point(1.0, 1.0)),
        ]);
        let converter = FeatureConverter::new(
            TileCoord::new(0, 0, 0),
            CoordinateSystem::WebMercatorMeters,
            ConversionPolicy::SkipFeature,
        );

        let layer = converter.convert(&payload).unwrap();
        assert_eq!(layer.features.len(), 2);
        assert_eq!(layer.length, 3);
    }

    #[test]
    fn test_point_without_coordinates_is_rejected() {
        let feature = RawFeature::new(RawGeometry {
            kind: "Point".to_string(),
            coordinates: json!([]),
        });
        let converter = FeatureConverter::new(
            TileCoord::new(0, 0, 0),
            CoordinateSystem::WebMercatorMeters,
            ConversionPolicy::FailTile,
        );

        assert!(matches!(
            converter.convert_feature(&feature),
            Err(Error::InvalidCoordinates(_))
        ));
    }

    #[test]
    fn test_geographic_input() {
        let converter = FeatureConverter::new(
            TileCoord::new(1, 1, 1),
            CoordinateSystem::Geographic,
            ConversionPolicy::FailTile,
        );
        let converted = converter
            .convert_feature(&RawFeature::new(RawGeometry::point(0.0, 0.0)))
            .unwrap();

        assert_eq!(converted.location(), ProjectedPoint::new(0, 0));
    }
}
