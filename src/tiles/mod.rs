pub mod grid;
pub mod relevance;
pub mod source;
pub mod transport;

// Re-exports for convenience
pub use grid::{fetch_tiles, GeoJsonGridSource, GridSource};
pub use relevance::is_current;
pub use source::{RotatingSubdomains, SubdomainSelector, TileSource, UrlTemplate};
pub use transport::{
    BufferedResponse, Credentials, HttpTransport, RequestOptions, TileResponse, TileTransport,
};
