#![forbid(unsafe_code)]

mod job;
mod rendering;

pub use job::{GridJob, PolygonDef};
pub use rendering::{init_tracing, render_grid_to_png, PngRenderer, RenderConfig};
