use crate::core::constants::{EARTH_RADIUS, MAX_LATITUDE, TILE_SIZE};
use crate::core::geo::{LatLng, LatLngBounds, Point};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Snapshot of the visible map: center, zoom, and screen dimensions.
///
/// Zoom is stored as the host reports it; zoom limits are the host's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current discrete zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// Target zoom of an in-progress zoom animation
    animate_to_zoom: Option<f64>,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            center,
            zoom,
            size,
            animate_to_zoom: None,
        }
    }

    /// Sets the center of the viewport, clamped to the projectable world
    pub fn set_center(&mut self, center: LatLng) {
        self.center = LatLng::new(
            center.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE),
            center.lng.clamp(-180.0, 180.0),
        );
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }

    /// Begins a zoom animation towards `target_zoom`.
    ///
    /// The discrete zoom is left untouched until the animation completes so
    /// that pixel math stays stable while tiles for the target level load.
    pub fn start_zoom_animation(&mut self, target_zoom: f64) {
        self.animate_to_zoom = Some(target_zoom);
    }

    /// Completes the running zoom animation, adopting its target zoom
    pub fn finish_zoom_animation(&mut self) {
        if let Some(target) = self.animate_to_zoom.take() {
            self.set_zoom(target);
        }
    }

    /// Check if a zoom animation is currently active
    pub fn is_zoom_animating(&self) -> bool {
        self.animate_to_zoom.is_some()
    }

    /// Zoom level tiles should be requested for: the animation target while
    /// zooming, the discrete zoom otherwise
    pub fn active_zoom(&self) -> f64 {
        self.animate_to_zoom.unwrap_or(self.zoom)
    }

    /// Projects a LatLng to world pixel coordinates at the given zoom level
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        let z = zoom.unwrap_or(self.zoom);
        let scale = TILE_SIZE as f64 * 2_f64.powf(z);

        let meters = lat_lng.to_mercator();
        let half_world = PI * EARTH_RADIUS;
        let pixel_x = (meters.x + half_world) / (2.0 * half_world) * scale;
        let pixel_y = (-meters.y + half_world) / (2.0 * half_world) * scale;

        Point::new(pixel_x, pixel_y)
    }

    /// Unprojects world pixel coordinates back to LatLng at the given zoom level
    pub fn unproject(&self, pixel: &Point, zoom: Option<f64>) -> LatLng {
        let z = zoom.unwrap_or(self.zoom);
        let scale = TILE_SIZE as f64 * 2_f64.powf(z);

        let half_world = PI * EARTH_RADIUS;
        let x = (pixel.x / scale) * (2.0 * half_world) - half_world;
        let y = half_world - (pixel.y / scale) * (2.0 * half_world);

        LatLng::from_mercator(Point::new(x, y))
    }

    /// World pixel of the top-left corner of the container
    fn pixel_origin(&self) -> Point {
        let center = self.project(&self.center, None);
        Point::new(center.x - self.size.x / 2.0, center.y - self.size.y / 2.0)
    }

    /// Converts container pixel coordinates back to geographical coordinates
    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        self.unproject(&pixel.add(&self.pixel_origin()), None)
    }

    /// Gets the current viewport bounds in geographical coordinates
    pub fn bounds(&self) -> LatLngBounds {
        let nw = self.pixel_to_lat_lng(&Point::new(0.0, 0.0));
        let se = self.pixel_to_lat_lng(&Point::new(self.size.x, self.size.y));

        LatLngBounds::new(LatLng::new(se.lat, nw.lng), LatLng::new(nw.lat, se.lng))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::new(0.0, 0.0), 0.0, Point::new(800.0, 600.0))
    }
}

/// Read access to the live viewport of the host map.
///
/// `None` means no map is bound yet.
pub trait ViewportProvider: Send + Sync {
    fn snapshot(&self) -> Option<Viewport>;
}

/// Viewport slot shared between the host map (writer) and tile sources (readers)
#[derive(Debug, Default)]
pub struct SharedViewport {
    inner: RwLock<Option<Viewport>>,
}

impl SharedViewport {
    /// Creates a slot with no viewport bound
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot already bound to `viewport`
    pub fn bound(viewport: Viewport) -> Self {
        Self {
            inner: RwLock::new(Some(viewport)),
        }
    }

    /// Replaces the bound viewport
    pub fn bind(&self, viewport: Viewport) {
        *self.write() = Some(viewport);
    }

    /// Detaches the viewport, e.g. when the layer is removed from the map
    pub fn unbind(&self) {
        *self.write() = None;
    }

    /// Mutates the bound viewport in place; no-op when nothing is bound
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Viewport),
    {
        if let Some(viewport) = self.write().as_mut() {
            f(viewport);
        }
    }

    // A writer that panicked leaves the last stored viewport behind; keep serving it.
    fn read(&self) -> RwLockReadGuard<'_, Option<Viewport>> {
        self.inner.read().unwrap_or_else(|poisoned| {
            log::warn!("viewport lock poisoned, using last written viewport");
            PoisonError::into_inner(poisoned)
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Viewport>> {
        self.inner.write().unwrap_or_else(|poisoned| {
            log::warn!("viewport lock poisoned, using last written viewport");
            PoisonError::into_inner(poisoned)
        })
    }
}

impl ViewportProvider for SharedViewport {
    fn snapshot(&self) -> Option<Viewport> {
        self.read().clone()
    }
}

impl ViewportProvider for Option<Viewport> {
    fn snapshot(&self) -> Option<Viewport> {
        self.clone()
    }
}
