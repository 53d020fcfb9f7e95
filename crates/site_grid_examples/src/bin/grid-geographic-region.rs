use geo::{polygon, Polygon};
use site_grid::prelude::*;
use site_grid_examples::{init_tracing, PngRenderer};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();
    // Longitude/latitude outline; resolution is in degrees, areas are taken on WGS84.
    let region = Region::wgs84(basin())?;

    let config = GridConfig::new(0.02)
        .with_overlap_threshold(0.6)
        .with_visualize(true);
    let mut renderer = PngRenderer::new("grid-geographic-region.png");
    let grid = GridBuilder::try_new(config)?.build_with_renderer(&region, &mut renderer)?;

    info!(
        "{} candidate sites on a {} x {} raster ({} images written)",
        grid.len(),
        grid.stats.columns,
        grid.stats.rows,
        renderer.written
    );
    Ok(())
}

fn basin() -> Polygon<f64> {
    polygon![
        (x: 8.90, y: 47.40),
        (x: 9.35, y: 47.48),
        (x: 9.62, y: 47.58),
        (x: 9.55, y: 47.66),
        (x: 9.18, y: 47.70),
        (x: 9.02, y: 47.62),
    ]
}
