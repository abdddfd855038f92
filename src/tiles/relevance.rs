use crate::core::{
    geo::{LatLngBounds, TileCoord},
    viewport::Viewport,
};

/// Whether a tile request still matches what the map is showing.
///
/// With no viewport bound every tile is current. Otherwise the tile's zoom
/// must equal the viewport's active zoom (the animation target while zooming)
/// and the tile must overlap the visible bounds. `tile_bounds` can be passed
/// when the caller has already computed them; otherwise they are derived
/// from `coords`.
pub fn is_current(
    coords: &TileCoord,
    viewport: Option<&Viewport>,
    tile_bounds: Option<&LatLngBounds>,
) -> bool {
    let Some(viewport) = viewport else {
        return true;
    };

    if viewport.active_zoom() != coords.z as f64 {
        return false;
    }

    match tile_bounds {
        Some(bounds) => viewport.bounds().overlaps(bounds),
        None => viewport.bounds().overlaps(&coords.bounds()),
    }
}
