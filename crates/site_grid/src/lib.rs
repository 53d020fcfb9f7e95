#![forbid(unsafe_code)]
//! site_grid: overlap-filtered regular grids over planar regions.
//!
//! A region is rasterized into square cells, each cell's overlap with the region is
//! measured under an equal-area projection, and the centroids of cells meeting an
//! overlap threshold become candidate sites for downstream placement.
//!
//! Modules:
//! - region: input polygons and their coordinate reference system
//! - grid: raster construction, overlap ratios and threshold handling
//! - projection: equal-area projections used for area arithmetic
//! - builder: configuration and the end-to-end build
//! - site: candidate points and build results
//! - events, render: observation and visualization hooks
pub mod builder;
pub mod error;
pub mod events;
pub mod grid;
pub mod projection;
pub mod region;
pub mod render;
pub mod site;

/// Convenient re-exports for common types. Import with `use site_grid::prelude::*;`.
pub mod prelude {
    pub use crate::builder::{build_grid, build_with, GridBuilder, GridConfig};
    pub use crate::error::{Error, Result};
    pub use crate::events::{EventSink, FnSink, GridEvent, GridEventKind, MultiSink, VecSink};
    pub use crate::grid::{CellOverlap, CellRaster, GridCell, OverlapThreshold};
    pub use crate::projection::{
        Ellipsoid, EqualAreaProjection, LambertAzimuthalEqualArea, PlanarArea,
    };
    pub use crate::region::{Crs, Region};
    pub use crate::render::{FnRenderer, GridRenderer};
    pub use crate::site::{CandidatePoint, GridStats, SiteGrid};
}
