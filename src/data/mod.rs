pub mod classify;
pub mod conversion;
pub mod geojson;
pub mod projection;
pub mod vector;

// Re-exports for convenience
pub use classify::{classify, classify_supported, FeatureKind};
pub use conversion::{ConversionPolicy, FeatureConverter};
pub use geojson::{FeatureCollection, RawFeature, RawGeometry};
pub use projection::CoordinateSystem;
pub use vector::{ConvertedFeature, ProjectedPoint, TileLayer, TileResult};
