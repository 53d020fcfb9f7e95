use site_grid::prelude::*;
use site_grid_examples::{init_tracing, GridJob, PngRenderer};
use tracing::info;

const DEFAULT_JOB: &str = include_str!("../../jobs/reservoir.ron");

fn main() -> anyhow::Result<()> {
    init_tracing();
    let job = match std::env::args().nth(1) {
        Some(path) => GridJob::load(path)?,
        None => GridJob::from_ron(DEFAULT_JOB)?,
    };
    let region = job.region()?;

    let mut sink = VecSink::only([GridEventKind::RasterBuilt, GridEventKind::Warning]);
    let mut renderer = PngRenderer::new(&job.output);
    let grid = build_with(
        &region,
        &job.config,
        &mut sink,
        Some(&mut renderer as &mut dyn GridRenderer),
    )?;

    for event in sink.as_slice() {
        info!("{event:?}");
    }
    for p in grid.points.iter().take(10) {
        info!("#{} ({:.2}, {:.2})", p.id, p.x, p.y);
    }
    info!("{} candidate sites", grid.len());
    Ok(())
}
