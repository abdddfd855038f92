//! Projection of payload coordinates into tile-local integer space
//!
//! Two steps: coordinates are first normalized to Web Mercator unit space
//! (`[0, 1] x [0, 1]`, origin at the north-west corner of the world), then
//! scaled by the zoom factor, shifted by the tile index and quantized to the
//! tile extent.
//!
//! Quantization rounds half to even. Out-of-tile positions are not clamped,
//! and NaN inputs are not rejected (they saturate to `0` on the integer cast).

use crate::core::constants::MERCATOR_CIRCUMFERENCE;
use crate::data::vector::ProjectedPoint;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Maps an EPSG:900913 X coordinate in meters to unit space
pub fn spherical_mercator_x(x: f64) -> f64 {
    x / MERCATOR_CIRCUMFERENCE + 0.5
}

/// Maps an EPSG:900913 Y coordinate in meters to unit space (Y grows southwards)
pub fn spherical_mercator_y(y: f64) -> f64 {
    1.0 - (y / MERCATOR_CIRCUMFERENCE + 0.5)
}

/// Inverse of [`spherical_mercator_x`]
pub fn unit_to_mercator_x(unit: f64) -> f64 {
    (unit - 0.5) * MERCATOR_CIRCUMFERENCE
}

/// Inverse of [`spherical_mercator_y`]
pub fn unit_to_mercator_y(unit: f64) -> f64 {
    (0.5 - unit) * MERCATOR_CIRCUMFERENCE
}

/// Maps an EPSG:4326 longitude in degrees to unit space
pub fn geographic_x(lng: f64) -> f64 {
    lng / 360.0 + 0.5
}

/// Maps an EPSG:4326 latitude in degrees to unit space, clamped to `[0, 1]`
pub fn geographic_y(lat: f64) -> f64 {
    let sin = lat.to_radians().sin();
    let y = 0.5 - 0.25 * ((1.0 + sin) / (1.0 - sin)).ln() / PI;
    y.clamp(0.0, 1.0)
}

/// Quantizes a unit-space position into the local space of tile `(tile_x, tile_y)`.
///
/// `zoom_factor` is `2^z` for the tile's zoom level.
pub fn tile_space_project(
    x_unit: f64,
    y_unit: f64,
    extent: u32,
    zoom_factor: f64,
    tile_x: u32,
    tile_y: u32,
) -> ProjectedPoint {
    let extent = extent as f64;
    let x = extent * (x_unit * zoom_factor - tile_x as f64);
    let y = extent * (y_unit * zoom_factor - tile_y as f64);

    ProjectedPoint::new(x.round_ties_even() as i64, y.round_ties_even() as i64)
}

/// How coordinates in a tile payload are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoordinateSystem {
    /// Pre-projected EPSG:900913 meters
    #[default]
    WebMercatorMeters,
    /// Longitude/latitude degrees (EPSG:4326)
    Geographic,
}

impl CoordinateSystem {
    /// Normalizes an `(x, y)` payload pair to Web Mercator unit space
    pub fn to_unit(&self, x: f64, y: f64) -> (f64, f64) {
        match self {
            CoordinateSystem::WebMercatorMeters => (spherical_mercator_x(x), spherical_mercator_y(y)),
            CoordinateSystem::Geographic => (geographic_x(x), geographic_y(y)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{constants::TILE_EXTENT, geo::LatLng};

    const EPSILON: f64 = 1e-9;

    fn corner_meters(x: u32, y: u32, z: u8) -> (f64, f64) {
        let n = 2_f64.powi(z as i32);
        (
            unit_to_mercator_x(x as f64 / n),
            unit_to_mercator_y(y as f64 / n),
        )
    }

    #[test]
    fn test_origin_maps_to_world_center() {
        assert_eq!(spherical_mercator_x(0.0), 0.5);
        assert_eq!(spherical_mercator_y(0.0), 0.5);
        assert_eq!(spherical_mercator_x(MERCATOR_CIRCUMFERENCE / 2.0), 1.0);
        assert_eq!(spherical_mercator_y(MERCATOR_CIRCUMFERENCE / 2.0), 0.0);
    }

    #[test]
    fn test_unit_round_trip_across_longitudes() {
        for step in 0..=36 {
            let lng = -180.0 + step as f64 * 10.0;
            for lat in [-80.0, -45.0, 0.0, 30.0, 85.0] {
                let meters = LatLng::new(lat, lng).to_mercator();
                let ux = spherical_mercator_x(meters.x);
                let uy = spherical_mercator_y(meters.y);

                assert!((spherical_mercator_x(unit_to_mercator_x(ux)) - ux).abs() < EPSILON);
                assert!((spherical_mercator_y(unit_to_mercator_y(uy)) - uy).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn test_mercator_matches_geographic_units() {
        let position = LatLng::new(48.8566, 2.3522);
        let meters = position.to_mercator();

        assert!((spherical_mercator_x(meters.x) - geographic_x(position.lng)).abs() < 1e-6);
        assert!((spherical_mercator_y(meters.y) - geographic_y(position.lat)).abs() < 1e-6);
    }

    #[test]
    fn test_geographic_y_is_clamped() {
        assert_eq!(geographic_y(90.0), 0.0);
        assert_eq!(geographic_y(-90.0), 1.0);
        assert!((geographic_y(0.0) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_tile_corners() {
        for (x, y, z) in [(0, 0, 0), (1, 2, 3), (5, 9, 4), (1023, 17, 10), (70_000, 41_000, 17)] {
            let n = 2_f64.powi(z as i32);

            let (mx, my) = corner_meters(x, y, z);
            let top_left = tile_space_project(
                spherical_mercator_x(mx),
                spherical_mercator_y(my),
                TILE_EXTENT,
                n,
                x,
                y,
            );
            assert_eq!(top_left, ProjectedPoint::new(0, 0), "top-left of {x}/{y}/{z}");

            let (mx, my) = corner_meters(x + 1, y + 1, z);
            let bottom_right = tile_space_project(
                spherical_mercator_x(mx),
                spherical_mercator_y(my),
                TILE_EXTENT,
                n,
                x,
                y,
            );
            assert_eq!(
                bottom_right,
                ProjectedPoint::new(TILE_EXTENT as i64, TILE_EXTENT as i64),
                "bottom-right of {x}/{y}/{z}"
            );
        }
    }

    #[test]
    fn test_positions_outside_tile_are_not_clamped() {
        let point = tile_space_project(0.0, 1.0, TILE_EXTENT, 2.0, 1, 0);
        assert_eq!(point, ProjectedPoint::new(-4096, 8192));
    }

    #[test]
    fn test_rounding_is_half_to_even() {
        // 0.5 / 4096 and 1.5 / 4096 land exactly on half units
        assert_eq!(tile_space_project(0.5 / 4096.0, 1.5 / 4096.0, 4096, 1.0, 0, 0), ProjectedPoint::new(0, 2));
        assert_eq!(tile_space_project(2.5 / 4096.0, 0.0, 4096, 1.0, 0, 0), ProjectedPoint::new(2, 0));
    }

    #[test]
    fn test_projection_is_deterministic() {
        let a = tile_space_project(0.123456789, 0.987654321, TILE_EXTENT, 1024.0, 126, 1011);
        let b = tile_space_project(0.123456789, 0.987654321, TILE_EXTENT, 1024.0, 126, 1011);
        assert_eq!(a, b);
    }

    #[test]
    fn test_coordinate_system_dispatch() {
        assert_eq!(CoordinateSystem::WebMercatorMeters.to_unit(0.0, 0.0), (0.5, 0.5));
        let (ux, uy) = CoordinateSystem::Geographic.to_unit(-180.0, 0.0);
        assert_eq!(ux, 0.0);
        assert!((uy - 0.5).abs() < EPSILON);
    }
}
