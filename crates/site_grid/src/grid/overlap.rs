//! Per-cell overlap ratios computed under an equal-area projection.
//!
//! Every record carries the stable cell index from [`GridCell`]; intersection results are
//! joined back to their cell's full area by that index, never by position.
use std::collections::BTreeMap;

use geo::{
    coord, Area, BooleanOps, BoundingRect, Contains, Intersects, MultiPolygon, Polygon, Rect,
    Translate,
};
use tracing::{debug, warn};

use super::raster::GridCell;
use super::threshold::RATIO_TOLERANCE;
use crate::error::{Error, Result};
use crate::events::{EventSink, GridEvent, GridEventKind};
use crate::projection::{project_multi_polygon, project_polygon, EqualAreaProjection};

/// Overlap of one grid cell with the region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellOverlap {
    /// Stable index of the source cell.
    pub index: usize,
    /// Full projected cell area; zero for cells outside the projection's domain.
    pub cell_area: f64,
    /// Projected area of the cell lying inside the region.
    pub dry_area: f64,
    /// `dry_area / cell_area`, or 0 when the cell has no projected area.
    pub ratio: f64,
}

struct ProjectedCell<'a> {
    source: &'a GridCell,
    /// `None` when the cell leaves the projection's domain.
    polygon: Option<Polygon<f64>>,
    area: f64,
}

/// Computes [`CellOverlap`]s for `cells`, returned in ascending index order.
///
/// Cells reaching outside the projection's domain (past a pole for geographic regions)
/// are not projected and count as uncovered; a [`GridEvent::Warning`] reports how many.
pub fn compute_overlaps(
    cells: &[GridCell],
    region: &MultiPolygon<f64>,
    projection: &dyn EqualAreaProjection,
    sink: &mut dyn EventSink,
) -> Result<Vec<CellOverlap>> {
    let projected_region = project_multi_polygon(projection, region)?;
    let Some(region_bounds) = projected_region.bounding_rect() else {
        return Err(Error::Geometry("projected region has no extent".into()));
    };

    let mut projected: Vec<ProjectedCell<'_>> = cells
        .iter()
        .map(|cell| {
            let in_domain = cell
                .polygon
                .bounding_rect()
                .is_some_and(|bounds| projection.covers(&bounds));
            if !in_domain {
                return Ok(ProjectedCell {
                    source: cell,
                    polygon: None,
                    area: 0.0,
                });
            }
            let polygon = project_polygon(projection, &cell.polygon)?;
            let area = polygon.unsigned_area();
            if area.is_nan() || area <= 0.0 {
                return Err(Error::Geometry(format!(
                    "cell {} has no projected area",
                    cell.index
                )));
            }
            Ok(ProjectedCell {
                source: cell,
                polygon: Some(polygon),
                area,
            })
        })
        .collect::<Result<_>>()?;
    projected.sort_by_key(|c| c.source.index);

    let outside_domain = projected.iter().filter(|c| c.polygon.is_none()).count();
    if outside_domain > 0 {
        warn!(
            cells = outside_domain,
            projection = projection.name(),
            "Cells outside the projection's domain count as uncovered."
        );
        if sink.wants(GridEventKind::Warning) {
            sink.send(GridEvent::Warning {
                context: "overlap".into(),
                message: format!(
                    "{outside_domain} cells lie outside the {} domain and count as uncovered",
                    projection.name()
                ),
            });
        }
    }

    let mut dry_by_index: BTreeMap<usize, f64> = BTreeMap::new();
    for cell in &projected {
        let Some(polygon) = &cell.polygon else {
            continue;
        };
        let touches = polygon
            .bounding_rect()
            .is_some_and(|bounds| bounds.intersects(&region_bounds));
        if !touches {
            continue;
        }
        let dry = if fully_covered(&cell.source.polygon, region) {
            cell.area
        } else {
            local_intersection_area(polygon, &projected_region)
        };
        if dry > 0.0 {
            dry_by_index.insert(cell.source.index, dry);
        }
    }
    debug!(
        cells = projected.len(),
        intersecting = dry_by_index.len(),
        projection = projection.name(),
        "Computed cell intersections."
    );

    let mut overlaps = Vec::with_capacity(projected.len());
    for cell in &projected {
        let index = cell.source.index;
        let dry = dry_by_index.get(&index).copied().unwrap_or(0.0);
        if dry > cell.area * (1.0 + RATIO_TOLERANCE) {
            let ratio = dry / cell.area;
            warn!(index, ratio, "Cell overlap exceeds its own area; clamped to the cell.");
            if sink.wants(GridEventKind::Warning) {
                sink.send(GridEvent::Warning {
                    context: "overlap".into(),
                    message: format!("cell {index} overlap ratio {ratio} clamped to 1"),
                });
            }
        }
        let dry_area = dry.min(cell.area);
        let ratio = if cell.area > 0.0 {
            dry_area / cell.area
        } else {
            0.0
        };
        overlaps.push(CellOverlap {
            index,
            cell_area: cell.area,
            dry_area,
            ratio,
        });
    }
    Ok(overlaps)
}

/// Whether `cell`, inset on every side by a quarter of [`RATIO_TOLERANCE`] of its size, lies
/// inside `region`. Tested in the region's own CRS, where cell and region edges coincide
/// exactly.
fn fully_covered(cell: &Polygon<f64>, region: &MultiPolygon<f64>) -> bool {
    let Some(bounds) = cell.bounding_rect() else {
        return false;
    };
    let dx = bounds.width() * RATIO_TOLERANCE / 4.0;
    let dy = bounds.height() * RATIO_TOLERANCE / 4.0;
    let inner = Rect::new(
        coord! { x: bounds.min().x + dx, y: bounds.min().y + dy },
        coord! { x: bounds.max().x - dx, y: bounds.max().y - dy },
    );
    region.contains(&inner.to_polygon())
}

/// Area of `cell ∩ region`, intersected in coordinates local to the cell and only against
/// region parts whose bounds meet it.
fn local_intersection_area(cell: &Polygon<f64>, region: &MultiPolygon<f64>) -> f64 {
    let Some(origin) = cell.exterior().0.first().copied() else {
        return 0.0;
    };
    let Some(bounds) = cell.bounding_rect() else {
        return 0.0;
    };
    let nearby: Vec<Polygon<f64>> = region
        .iter()
        .filter(|part| part.bounding_rect().is_some_and(|b| b.intersects(&bounds)))
        .map(|part| part.translate(-origin.x, -origin.y))
        .collect();
    if nearby.is_empty() {
        return 0.0;
    }
    cell.translate(-origin.x, -origin.y)
        .intersection(&MultiPolygon::new(nearby))
        .unsigned_area()
}
