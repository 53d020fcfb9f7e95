//! Candidate sites produced by a grid build.
use geo::Polygon;
use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Centroid of a retained cell, offered as a placement site.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CandidatePoint {
    /// Dense 1-based id in retention order.
    pub id: usize,
    /// Centroid X in the region's CRS.
    pub x: f64,
    /// Centroid Y in the region's CRS.
    pub y: f64,
    /// Stable raster index of the source cell.
    pub cell_index: usize,
    /// Fraction of the source cell inside the region.
    pub overlap_ratio: f64,
}

impl CandidatePoint {
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl From<CandidatePoint> for mint::Point2<f64> {
    fn from(p: CandidatePoint) -> Self {
        mint::Point2 { x: p.x, y: p.y }
    }
}

/// Summary of a grid build.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridStats {
    /// Raster columns.
    pub columns: usize,
    /// Raster rows.
    pub rows: usize,
    /// Cells covering the region's extent.
    pub cells_total: usize,
    /// Cells with a non-zero overlap.
    pub cells_intersecting: usize,
    /// Cells meeting the threshold.
    pub cells_retained: usize,
    /// Threshold after clamping.
    pub effective_threshold: f64,
}

/// Candidate points and the geometry of their cells, index-aligned.
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SiteGrid {
    /// Candidate points, ids `1..=len`.
    pub points: Vec<CandidatePoint>,
    /// Retained cell outlines in the region's CRS; `cells[i]` belongs to `points[i]`.
    pub cells: Vec<Polygon<f64>>,
    pub stats: GridStats,
}

impl SiteGrid {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over `(point, cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&CandidatePoint, &Polygon<f64>)> {
        self.points.iter().zip(self.cells.iter())
    }

    /// Looks up a point by its 1-based id.
    pub fn point(&self, id: usize) -> Option<&CandidatePoint> {
        id.checked_sub(1).and_then(|i| self.points.get(i))
    }

    /// Point positions in id order.
    pub fn positions(&self) -> Vec<DVec2> {
        self.points.iter().map(CandidatePoint::position).collect()
    }
}
