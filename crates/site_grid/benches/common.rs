use std::time::Duration;

use criterion::{Criterion, Throughput};
use geo::{polygon, Polygon};
use site_grid::region::Region;

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_millis(500);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(3);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn cells_throughput(cells: usize) -> Throughput {
    Throughput::Elements(cells.max(1) as u64)
}

/// Non-convex 40 km x 38 km lake with an island, in meters.
pub fn lake_region() -> Region {
    let lake: Polygon<f64> = polygon!(
        exterior: [
            (x: 0.0, y: 0.0),
            (x: 40_000.0, y: 0.0),
            (x: 40_000.0, y: 15_000.0),
            (x: 26_000.0, y: 21_000.0),
            (x: 17_000.0, y: 15_000.0),
            (x: 17_000.0, y: 38_000.0),
            (x: 0.0, y: 38_000.0),
        ],
        interiors: [[
            (x: 3_000.0, y: 3_000.0),
            (x: 9_000.0, y: 3_000.0),
            (x: 9_000.0, y: 11_000.0),
            (x: 3_000.0, y: 11_000.0),
        ]],
    );
    Region::planar(lake).expect("lake region is valid")
}
