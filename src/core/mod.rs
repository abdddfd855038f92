pub mod config;
pub mod constants;
pub mod geo;
pub mod viewport;

// Re-exports for convenience
pub use config::GridSourceOptions;
pub use geo::{Crs, LatLng, LatLngBounds, Point, TileCoord};
pub use viewport::{SharedViewport, Viewport, ViewportProvider};
