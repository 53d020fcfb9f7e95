//! Square-cell raster covering a region's extent, and its polygonization.
//!
//! Cells are indexed `1..=N` row-major: rows run bottom-to-top from the extent's lower
//! edge, columns left-to-right.
use geo::{coord, Coord, Polygon, Rect};

use crate::region::Crs;

/// A regular raster of square cells anchored at the lower-left corner of an extent.
#[derive(Clone, Debug, PartialEq)]
pub struct CellRaster {
    /// Lower-left corner of the raster in the region's CRS.
    pub origin: Coord<f64>,
    /// Cell side length in CRS units.
    pub resolution: f64,
    /// Number of cells along X.
    pub columns: usize,
    /// Number of cells along Y.
    pub rows: usize,
    /// Spatial reference shared with the region.
    pub crs: Crs,
}

/// One cell of a [`CellRaster`] as an independent polygon.
#[derive(Clone, Debug, PartialEq)]
pub struct GridCell {
    /// Stable 1-based index in raster order.
    pub index: usize,
    pub column: usize,
    pub row: usize,
    /// Cell outline in the region's CRS.
    pub polygon: Polygon<f64>,
}

impl CellRaster {
    /// Builds the smallest raster of `resolution`-sized cells covering `extent`.
    pub fn covering(extent: Rect<f64>, resolution: f64, crs: Crs) -> Self {
        let (columns, rows) = Self::dimensions_for(extent, resolution);
        Self {
            origin: extent.min(),
            resolution,
            columns,
            rows,
            crs,
        }
    }

    /// Column and row counts needed to cover `extent`.
    ///
    /// Extents that are an exact multiple of the resolution (up to round-off) do not
    /// grow an extra column or row.
    pub fn dimensions_for(extent: Rect<f64>, resolution: f64) -> (usize, usize) {
        (
            span_count(extent.width(), resolution),
            span_count(extent.height(), resolution),
        )
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.columns.saturating_mul(self.rows)
    }

    /// Full raster extent; may reach past the covered extent on the top and right.
    pub fn extent(&self) -> Rect<f64> {
        Rect::new(
            self.origin,
            coord! {
                x: self.origin.x + self.columns as f64 * self.resolution,
                y: self.origin.y + self.rows as f64 * self.resolution,
            },
        )
    }

    /// 1-based index of the cell at `(column, row)`.
    pub fn index_of(&self, column: usize, row: usize) -> usize {
        debug_assert!(column < self.columns && row < self.rows);
        row * self.columns + column + 1
    }

    /// `(column, row)` of a 1-based cell index, or `None` when out of range.
    pub fn position_of(&self, index: usize) -> Option<(usize, usize)> {
        if index == 0 || index > self.cell_count() {
            return None;
        }
        let i = index - 1;
        Some((i % self.columns, i / self.columns))
    }

    /// Bounds of the cell at `(column, row)`.
    pub fn cell_rect(&self, column: usize, row: usize) -> Rect<f64> {
        let min = coord! {
            x: self.origin.x + column as f64 * self.resolution,
            y: self.origin.y + row as f64 * self.resolution,
        };
        let max = coord! {
            x: min.x + self.resolution,
            y: min.y + self.resolution,
        };
        Rect::new(min, max)
    }

    /// Converts every cell to a polygon carrying its stable index.
    pub fn polygonize(&self) -> Vec<GridCell> {
        let mut cells = Vec::with_capacity(self.cell_count());
        for row in 0..self.rows {
            for column in 0..self.columns {
                cells.push(GridCell {
                    index: self.index_of(column, row),
                    column,
                    row,
                    polygon: self.cell_rect(column, row).to_polygon(),
                });
            }
        }
        cells
    }
}

fn span_count(length: f64, resolution: f64) -> usize {
    let raw = length / resolution;
    let rounded = raw.round();
    let n = if (raw - rounded).abs() <= 1e-9 * rounded.max(1.0) {
        rounded
    } else {
        raw.ceil()
    };
    n.max(1.0) as usize
}

#[cfg(test)]
mod tests {
    use geo::{Area, Centroid};

    use super::*;

    fn extent(w: f64, h: f64) -> Rect<f64> {
        Rect::new(coord! { x: 10.0, y: 20.0 }, coord! { x: 10.0 + w, y: 20.0 + h })
    }

    #[test]
    fn exact_multiple_does_not_grow() {
        let raster = CellRaster::covering(extent(2000.0, 1000.0), 500.0, Crs::Planar);
        assert_eq!((raster.columns, raster.rows), (4, 2));
        assert_eq!(raster.cell_count(), 8);
    }

    #[test]
    fn remainder_adds_a_partial_column() {
        let raster = CellRaster::covering(extent(2100.0, 400.0), 500.0, Crs::Planar);
        assert_eq!((raster.columns, raster.rows), (5, 1));
        let full = raster.extent();
        assert_eq!(full.max().x, 10.0 + 2500.0);
        assert_eq!(full.max().y, 20.0 + 500.0);
    }

    #[test]
    fn round_off_near_multiple_is_absorbed() {
        let (cols, rows) = CellRaster::dimensions_for(extent(0.3, 0.3), 0.1);
        assert_eq!((cols, rows), (3, 3));
    }

    #[test]
    fn polygonize_assigns_row_major_indices_from_bottom() {
        let raster = CellRaster::covering(extent(3.0, 2.0), 1.0, Crs::Planar);
        let cells = raster.polygonize();
        let indices: Vec<_> = cells.iter().map(|c| c.index).collect();
        assert_eq!(indices, (1..=6).collect::<Vec<_>>());

        let second_row_first = &cells[3];
        assert_eq!((second_row_first.column, second_row_first.row), (0, 1));
        let c = second_row_first.polygon.centroid().unwrap();
        assert!((c.x() - 10.5).abs() < 1e-12 && (c.y() - 21.5).abs() < 1e-12);
        assert!(cells.iter().all(|c| (c.polygon.unsigned_area() - 1.0).abs() < 1e-12));
    }

    #[test]
    fn position_of_inverts_index_of() {
        let raster = CellRaster::covering(extent(4.0, 3.0), 1.0, Crs::Planar);
        for row in 0..raster.rows {
            for column in 0..raster.columns {
                let idx = raster.index_of(column, row);
                assert_eq!(raster.position_of(idx), Some((column, row)));
            }
        }
        assert_eq!(raster.position_of(0), None);
        assert_eq!(raster.position_of(13), None);
    }
}
