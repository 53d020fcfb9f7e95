//! Grid builder: raster, overlap filtering and candidate extraction.
//!
//! [`GridBuilder`] runs the whole pipeline for one [`Region`]:
//! extent raster, polygonization, equal-area overlap ratios, threshold filtering and
//! centroid extraction. Builds are deterministic and keep no state between calls.
use std::sync::Arc;

use geo::Centroid;
use tracing::{debug, info};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::events::{EventSink, GridEvent, GridEventKind};
use crate::grid::{compute_overlaps, CellRaster, GridCell, OverlapThreshold};
use crate::projection::{default_projection_for, EqualAreaProjection};
use crate::region::Region;
use crate::render::GridRenderer;
use crate::site::{CandidatePoint, GridStats, SiteGrid};

/// Default cell side length in region units.
pub const DEFAULT_RESOLUTION: f64 = 500.0;
/// Default requested overlap threshold.
pub const DEFAULT_OVERLAP_THRESHOLD: f64 = 1.0;
/// Default upper bound on raster cells per build.
pub const DEFAULT_MAX_CELLS: usize = 4_000_000;

/// Configuration for building a candidate grid.
#[non_exhaustive]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct GridConfig {
    /// Cell side length in the region's CRS units.
    pub resolution: f64,
    /// Requested minimum overlap; clamped to `[0.01, 1.0]` when the build runs.
    pub overlap_threshold: f64,
    /// Invoke the renderer with the finished grid.
    pub visualize: bool,
    /// Largest raster (in cells) a build may allocate.
    pub max_cells: usize,
    /// Projection for area arithmetic; `None` picks one from the region's CRS.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub area_projection: Option<Arc<dyn EqualAreaProjection>>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            overlap_threshold: DEFAULT_OVERLAP_THRESHOLD,
            visualize: false,
            max_cells: DEFAULT_MAX_CELLS,
            area_projection: None,
        }
    }
}

impl GridConfig {
    /// Creates a new [`GridConfig`] with the specified resolution.
    pub fn new(resolution: f64) -> Self {
        Self {
            resolution,
            ..Default::default()
        }
    }

    /// Sets the requested overlap threshold.
    pub fn with_overlap_threshold(mut self, overlap_threshold: f64) -> Self {
        self.overlap_threshold = overlap_threshold;
        self
    }

    /// Enables or disables the visualization hook.
    pub fn with_visualize(mut self, visualize: bool) -> Self {
        self.visualize = visualize;
        self
    }

    /// Sets the maximum raster size.
    pub fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells;
        self
    }

    /// Uses the given projection for area arithmetic instead of the automatic choice.
    pub fn with_area_projection<P>(mut self, projection: P) -> Self
    where
        P: EqualAreaProjection + 'static,
    {
        self.area_projection = Some(Arc::new(projection));
        self
    }

    /// Shares an existing projection handle.
    pub fn with_shared_area_projection(
        mut self,
        projection: Arc<dyn EqualAreaProjection>,
    ) -> Self {
        self.area_projection = Some(projection);
        self
    }

    /// Threshold actually used for filtering.
    pub fn effective_threshold(&self) -> Result<OverlapThreshold> {
        OverlapThreshold::new(self.overlap_threshold)
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "resolution must be finite and > 0, got {}",
                self.resolution
            )));
        }
        self.effective_threshold()?;
        if self.max_cells == 0 {
            return Err(Error::InvalidConfig("max_cells must be > 0".into()));
        }
        Ok(())
    }
}

/// Builds candidate grids for regions.
#[derive(Debug, Clone)]
pub struct GridBuilder {
    /// Configuration applied to every build.
    pub config: GridConfig,
}

impl GridBuilder {
    pub fn try_new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn new(config: GridConfig) -> Self {
        debug_assert!(
            config.resolution.is_finite() && config.resolution > 0.0,
            "resolution must be finite and > 0"
        );
        debug_assert!(
            !config.overlap_threshold.is_nan(),
            "overlap_threshold must not be NaN"
        );
        Self { config }
    }

    /// Builds the grid for `region`.
    pub fn build(&self, region: &Region) -> Result<SiteGrid> {
        build_with(region, &self.config, &mut (), None)
    }

    pub fn build_with_events(
        &self,
        region: &Region,
        sink: &mut dyn EventSink,
    ) -> Result<SiteGrid> {
        build_with(region, &self.config, sink, None)
    }

    pub fn build_with_renderer(
        &self,
        region: &Region,
        renderer: &mut dyn GridRenderer,
    ) -> Result<SiteGrid> {
        build_with(region, &self.config, &mut (), Some(renderer))
    }
}

/// Builds a grid with default settings apart from resolution and threshold.
pub fn build_grid(region: &Region, resolution: f64, overlap_threshold: f64) -> Result<SiteGrid> {
    let config = GridConfig::new(resolution).with_overlap_threshold(overlap_threshold);
    GridBuilder::try_new(config)?.build(region)
}

/// Runs a build, emitting events to `sink` and rendering when `config.visualize` is set.
pub fn build_with(
    region: &Region,
    config: &GridConfig,
    sink: &mut dyn EventSink,
    renderer: Option<&mut dyn GridRenderer>,
) -> Result<SiteGrid> {
    config.validate()?;
    let threshold = config.effective_threshold()?;
    if threshold.value() != config.overlap_threshold {
        debug!(
            requested = config.overlap_threshold,
            effective = threshold.value(),
            "Overlap threshold coerced into supported range."
        );
    }

    let projection = match &config.area_projection {
        Some(projection) => projection.clone(),
        None => default_projection_for(region)?,
    };

    if sink.wants(GridEventKind::BuildStarted) {
        sink.send(GridEvent::BuildStarted {
            config: config.clone(),
            effective_threshold: threshold.value(),
            projection: projection.name().to_owned(),
        });
    }

    let extent = region.bounding_rect()?;
    let (columns, rows) = CellRaster::dimensions_for(extent, config.resolution);
    let cell_count = columns
        .checked_mul(rows)
        .filter(|&n| n <= config.max_cells)
        .ok_or_else(|| {
            Error::InvalidConfig(format!(
                "raster of {columns} x {rows} cells exceeds max_cells ({}); increase resolution",
                config.max_cells
            ))
        })?;
    let raster = CellRaster::covering(extent, config.resolution, region.crs());
    debug!(columns, rows, cell_count, "Raster covers region extent.");
    if sink.wants(GridEventKind::RasterBuilt) {
        sink.send(GridEvent::RasterBuilt {
            columns,
            rows,
            cell_count,
        });
    }

    let cells = raster.polygonize();
    let overlaps = compute_overlaps(&cells, region.geometry(), projection.as_ref(), &mut *sink)?;

    if sink.wants(GridEventKind::CellEvaluated) {
        for overlap in &overlaps {
            sink.send(GridEvent::CellEvaluated {
                index: overlap.index,
                ratio: overlap.ratio,
                retained: threshold.admits(overlap.ratio),
            });
        }
    }

    let retained: Vec<_> = overlaps
        .iter()
        .filter(|o| threshold.admits(o.ratio))
        .collect();
    if retained.is_empty() {
        return Err(Error::EmptyGrid {
            threshold: threshold.value(),
            cells: cell_count,
        });
    }

    let mut points = Vec::with_capacity(retained.len());
    let mut polygons = Vec::with_capacity(retained.len());
    for (offset, overlap) in retained.iter().enumerate() {
        let cell = cell_by_index(&cells, overlap.index)?;
        let centroid = cell.polygon.centroid().ok_or_else(|| {
            Error::Geometry(format!("cell {} has no centroid", cell.index))
        })?;
        points.push(CandidatePoint {
            id: offset + 1,
            x: centroid.x(),
            y: centroid.y(),
            cell_index: cell.index,
            overlap_ratio: overlap.ratio,
        });
        polygons.push(cell.polygon.clone());
    }

    let stats = GridStats {
        columns,
        rows,
        cells_total: cell_count,
        cells_intersecting: overlaps.iter().filter(|o| o.dry_area > 0.0).count(),
        cells_retained: points.len(),
        effective_threshold: threshold.value(),
    };
    info!(
        cells = stats.cells_total,
        intersecting = stats.cells_intersecting,
        retained = stats.cells_retained,
        threshold = stats.effective_threshold,
        "Grid built."
    );

    let grid = SiteGrid {
        points,
        cells: polygons,
        stats,
    };

    if sink.wants(GridEventKind::BuildFinished) {
        sink.send(GridEvent::BuildFinished {
            stats,
            grid: grid.clone(),
        });
    }

    if config.visualize {
        match renderer {
            Some(renderer) => renderer.render(region, &grid),
            None => debug!("Visualization requested without a renderer; skipping."),
        }
    }

    Ok(grid)
}

fn cell_by_index(cells: &[GridCell], index: usize) -> Result<&GridCell> {
    cells
        .binary_search_by_key(&index, |c| c.index)
        .map(|i| &cells[i])
        .map_err(|_| Error::Geometry(format!("no grid cell with index {index}")))
}
