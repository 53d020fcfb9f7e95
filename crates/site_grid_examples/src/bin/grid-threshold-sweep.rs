use geo::{polygon, Polygon};
use site_grid::prelude::*;
use site_grid_examples::{init_tracing, render_grid_to_png, RenderConfig};
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let region = Region::planar(lake())?;

    // Same region and resolution, increasingly strict overlap requirements.
    for threshold in [0.01, 0.25, 0.5, 0.75, 1.0] {
        let config = GridConfig::new(750.0).with_overlap_threshold(threshold);
        match GridBuilder::try_new(config)?.build(&region) {
            Ok(grid) => {
                info!(
                    "threshold {threshold:.2}: {} of {} cells retained ({} intersect the lake)",
                    grid.stats.cells_retained, grid.stats.cells_total, grid.stats.cells_intersecting
                );
                render_grid_to_png(
                    &region,
                    &grid,
                    &RenderConfig::default(),
                    format!("grid-threshold-{:03}.png", (threshold * 100.0).round() as u32),
                )?;
            }
            Err(e @ Error::EmptyGrid { .. }) => warn!("threshold {threshold:.2}: {e}"),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Non-convex lake with a wooded island, in meters.
fn lake() -> Polygon<f64> {
    polygon!(
        exterior: [
            (x: 0.0, y: 0.0),
            (x: 9_000.0, y: 600.0),
            (x: 10_500.0, y: 4_000.0),
            (x: 6_200.0, y: 4_800.0),
            (x: 5_000.0, y: 9_500.0),
            (x: 1_200.0, y: 8_000.0),
        ],
        interiors: [[
            (x: 2_000.0, y: 2_000.0),
            (x: 3_800.0, y: 2_200.0),
            (x: 3_400.0, y: 3_900.0),
            (x: 2_100.0, y: 3_500.0),
        ]],
    )
}
