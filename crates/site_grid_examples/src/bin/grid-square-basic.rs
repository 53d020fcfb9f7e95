use geo::{coord, Rect};
use site_grid::prelude::*;
use site_grid_examples::{init_tracing, render_grid_to_png, RenderConfig};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();
    // 2 km square in an equal-area planar CRS, 1 km cells.
    let square = Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 2000.0, y: 2000.0 });
    let region = Region::planar(square.to_polygon())?;

    let grid = build_grid(&region, 1000.0, 0.5)?;
    for p in &grid.points {
        info!(
            "#{} at ({:.1}, {:.1}) from cell {} (overlap {:.3})",
            p.id, p.x, p.y, p.cell_index, p.overlap_ratio
        );
    }

    render_grid_to_png(
        &region,
        &grid,
        &RenderConfig::default(),
        "grid-square-basic.png",
    )?;
    Ok(())
}
