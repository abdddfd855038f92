//! GeoJSON grid source: fetches tiles and converts them for the renderer
//!
//! Every request walks the same stages:
//! relevance check, fetch, second relevance check, decode, convert.
//! A tile that went stale at either check, or whose response was not a 2xx,
//! resolves to an empty [`TileResult`]. Transport, decode and conversion
//! failures fail the request.

use super::{
    relevance::is_current,
    source::{tile_template_values, RotatingSubdomains, SubdomainSelector, TileSource, UrlTemplate},
    transport::{HttpTransport, TileTransport},
};
use crate::{
    core::{
        config::GridSourceOptions,
        geo::{LatLngBounds, TileCoord},
        viewport::ViewportProvider,
    },
    data::{conversion::FeatureConverter, geojson::decode_payload, vector::TileResult},
    Result,
};
use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;

/// Capability a rendering host needs from a tiled data source
#[async_trait]
pub trait GridSource: Send + Sync {
    /// Fetches and converts one tile
    async fn fetch_tile(&self, coords: TileCoord) -> Result<TileResult>;

    /// Replaces the URL template, asking the host to redraw unless `skip_redraw`
    fn set_url(&mut self, url: &str, skip_redraw: bool) -> &mut Self
    where
        Self: Sized;
}

/// Fetches several tiles concurrently on the current task.
///
/// Results come back in the order of `coords`; each tile succeeds or fails
/// on its own.
pub async fn fetch_tiles<S, I>(source: &S, coords: I) -> Vec<Result<TileResult>>
where
    S: GridSource + ?Sized,
    I: IntoIterator<Item = TileCoord>,
{
    join_all(coords.into_iter().map(|coord| source.fetch_tile(coord))).await
}

type RedrawHook = Arc<dyn Fn() + Send + Sync>;

/// Grid source for endpoints serving one GeoJSON `FeatureCollection` per tile
pub struct GeoJsonGridSource {
    options: GridSourceOptions,
    transport: Arc<dyn TileTransport>,
    viewport: Option<Arc<dyn ViewportProvider>>,
    subdomains: Arc<dyn SubdomainSelector>,
    redraw: Option<RedrawHook>,
}

impl GeoJsonGridSource {
    /// Create a source fetching over HTTP with the shared client
    pub fn new(options: GridSourceOptions) -> Self {
        Self::with_transport(options, Arc::new(HttpTransport::new()))
    }

    /// Create a source on a custom transport
    pub fn with_transport(options: GridSourceOptions, transport: Arc<dyn TileTransport>) -> Self {
        Self {
            options,
            transport,
            viewport: None,
            subdomains: Arc::new(RotatingSubdomains),
            redraw: None,
        }
    }

    /// Binds the live viewport used for relevance checks
    pub fn with_viewport(mut self, viewport: Arc<dyn ViewportProvider>) -> Self {
        self.viewport = Some(viewport);
        self
    }

    pub fn with_subdomain_selector(mut self, selector: Arc<dyn SubdomainSelector>) -> Self {
        self.subdomains = selector;
        self
    }

    /// Registers the host's redraw entry point, invoked by [`GridSource::set_url`]
    pub fn on_redraw<F>(mut self, redraw: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.redraw = Some(Arc::new(redraw));
        self
    }

    /// Detaches the viewport; every tile is current afterwards
    pub fn unbind_viewport(&mut self) {
        self.viewport = None;
    }

    pub fn options(&self) -> &GridSourceOptions {
        &self.options
    }

    pub fn set_source_options(&mut self, options: GridSourceOptions) {
        self.options = options;
    }

    /// Replaces the options from a JSON blob; missing fields take defaults
    pub fn set_options(&mut self, options: serde_json::Value) -> Result<()> {
        self.options = serde_json::from_value(options)?;
        Ok(())
    }

    fn is_current(&self, coords: &TileCoord, tile_bounds: Option<&LatLngBounds>) -> bool {
        let viewport = self.viewport.as_ref().and_then(|provider| provider.snapshot());
        is_current(coords, viewport.as_ref(), tile_bounds)
    }
}

impl TileSource for GeoJsonGridSource {
    fn url(&self, coord: TileCoord) -> Result<String> {
        let subdomain = self.subdomains.select(coord, &self.options.subdomains);
        let values = tile_template_values(&self.options, subdomain, coord)?;
        UrlTemplate::new(self.options.url_template.as_str()).render(&values)
    }
}

#[async_trait]
impl GridSource for GeoJsonGridSource {
    async fn fetch_tile(&self, coords: TileCoord) -> Result<TileResult> {
        let tile_bounds = coords.bounds();
        if !self.is_current(&coords, Some(&tile_bounds)) {
            log::debug!("tile {:?} is stale, not fetching", coords);
            return Ok(TileResult::empty(coords));
        }

        let url = self.url(coords)?;
        log::debug!("fetching tile {:?} from {}", coords, url);

        let response = self.transport.fetch(&url, &self.options.fetch_options).await?;
        if !response.is_success() {
            log::warn!("HTTP {} for tile {:?}", response.status(), coords);
            return Ok(TileResult::empty(coords));
        }
        if !self.is_current(&coords, None) {
            log::debug!("tile {:?} went stale while fetching, dropping response", coords);
            return Ok(TileResult::empty(coords));
        }

        let body = response.body().await?;
        let Some(payload) = decode_payload(&body)? else {
            log::debug!("tile {:?} has no payload", coords);
            return Ok(TileResult::empty(coords));
        };

        let converter = FeatureConverter::new(
            coords,
            self.options.coordinate_system,
            self.options.conversion_policy,
        );
        let layer = converter.convert(&payload)?;
        log::debug!(
            "tile {:?}: converted {} of {} features",
            coords,
            layer.features.len(),
            layer.length
        );

        Ok(TileResult::with_layer(coords, layer))
    }

    fn set_url(&mut self, url: &str, skip_redraw: bool) -> &mut Self {
        self.options.url_template = url.to_string();
        if !skip_redraw {
            if let Some(redraw) = &self.redraw {
                redraw();
            }
        }
        self
    }
}
