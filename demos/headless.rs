//! Fetches a handful of GeoJSON tiles around a point and prints the layers.
//!
//! ```text
//! RUST_LOG=debug cargo run --example headless -- "https://example.com/points/{z}/{x}/{y}.json"
//! ```

use std::sync::Arc;
use vectorgrid::prelude::*;

#[tokio::main]
async fn main() {
    vectorgrid::init_logger();

    let template = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://{s}.tiles.example.com/points/{z}/{x}/{y}.json".to_string());

    let viewport = Arc::new(SharedViewport::bound(Viewport::new(
        LatLng::new(51.505, -0.09),
        12.0,
        Point::new(800.0, 600.0),
    )));
    let source = GeoJsonGridSource::new(GridSourceOptions::openstreetmap_style(template))
        .with_viewport(viewport.clone());

    let center = TileCoord::from_lat_lng(&LatLng::new(51.505, -0.09), 12);
    let coords: Vec<TileCoord> = (-1i64..=1)
        .flat_map(|dy| (-1i64..=1).map(move |dx| (dx, dy)))
        .map(|(dx, dy)| {
            TileCoord::new(
                (center.x as i64 + dx) as u32,
                (center.y as i64 + dy) as u32,
                center.z,
            )
        })
        .collect();

    for result in fetch_tiles(&source, coords).await {
        match result {
            Ok(tile) => match tile.layer("geojson") {
                Some(layer) => println!(
                    "{:?}: {} of {} features",
                    tile.coords,
                    layer.features.len(),
                    layer.length
                ),
                None => println!("{:?}: no data", tile.coords),
            },
            Err(e) => eprintln!("tile failed: {}", e),
        }
    }
}
