mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use site_grid::grid::{compute_overlaps, CellRaster};
use site_grid::projection::PlanarArea;

const RESOLUTIONS: [f64; 3] = [2000.0, 1000.0, 500.0];

fn overlap_benches(c: &mut Criterion) {
    let region = common::lake_region();
    let extent = region.bounding_rect().expect("extent");

    let mut group = c.benchmark_group("overlap/planar");
    for &resolution in &RESOLUTIONS {
        let cells = CellRaster::covering(extent, resolution, region.crs()).polygonize();
        group.throughput(common::cells_throughput(cells.len()));

        group.bench_with_input(
            BenchmarkId::from_parameter(resolution),
            &resolution,
            |b, _| {
                b.iter(|| {
                    let overlaps =
                        compute_overlaps(&cells, region.geometry(), &PlanarArea, &mut ())
                            .expect("overlaps");
                    black_box(overlaps.len());
                });
            },
        );
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = overlap_benches
}
criterion_main!(benches);
