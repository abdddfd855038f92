//! Core constants shared by the projection and tile pipeline.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Side length of the tile-local coordinate space features are projected into.
pub const TILE_EXTENT: u32 = 4096;

/// Name of the single layer produced for every GeoJSON tile.
pub const GEOJSON_LAYER_NAME: &str = "geojson";

/// Length of the equator in EPSG:900913 meters, as used by the unit projection.
pub const MERCATOR_CIRCUMFERENCE: f64 = 40_075_016.68;

/// Spherical earth radius used by Web Mercator (EPSG:3857).
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Latitude beyond which Web Mercator diverges.
pub const MAX_LATITUDE: f64 = 85.051_128_779_8;

/// Default square tile size in pixels, used for viewport pixel math.
pub const TILE_SIZE: u32 = 256;

/// Default subdomains rotated through by `{s}`.
pub const DEFAULT_SUBDOMAINS: [&str; 3] = ["a", "b", "c"];
