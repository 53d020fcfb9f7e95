//! Input regions and their coordinate reference systems.
use geo::{BoundingRect, CoordsIter, MultiPolygon, Rect};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::projection::Ellipsoid;

/// Coordinate reference system of a [`Region`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Crs {
    /// Projected coordinates in linear units; planar area is taken as true area.
    Planar,
    /// Longitude/latitude in degrees on the given ellipsoid.
    Geographic(Ellipsoid),
}

impl Crs {
    /// Longitude/latitude on WGS84.
    pub const WGS84: Crs = Crs::Geographic(Ellipsoid::WGS84);

    pub fn is_geographic(&self) -> bool {
        matches!(self, Crs::Geographic(_))
    }
}

/// Area of interest: one or more polygons (holes allowed) with a CRS.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Region {
    geometry: MultiPolygon<f64>,
    crs: Crs,
}

impl Region {
    /// Creates a region, rejecting empty geometry and non-finite coordinates.
    pub fn new(geometry: impl Into<MultiPolygon<f64>>, crs: Crs) -> Result<Self> {
        let geometry = geometry.into();
        if geometry.0.is_empty() || geometry.iter().all(|p| p.exterior().0.is_empty()) {
            return Err(Error::InvalidRegion("region has no polygons".into()));
        }
        if let Some(c) = geometry
            .coords_iter()
            .find(|c| !c.x.is_finite() || !c.y.is_finite())
        {
            return Err(Error::Geometry(format!(
                "region has a non-finite coordinate ({}, {})",
                c.x, c.y
            )));
        }
        Ok(Self { geometry, crs })
    }

    /// Region in planar linear units.
    pub fn planar(geometry: impl Into<MultiPolygon<f64>>) -> Result<Self> {
        Self::new(geometry, Crs::Planar)
    }

    /// Region in WGS84 longitude/latitude degrees.
    pub fn wgs84(geometry: impl Into<MultiPolygon<f64>>) -> Result<Self> {
        Self::new(geometry, Crs::WGS84)
    }

    pub fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }

    pub fn crs(&self) -> Crs {
        self.crs
    }

    /// Bounding rectangle; fails when the extent has no width or height.
    pub fn bounding_rect(&self) -> Result<Rect<f64>> {
        let rect = self
            .geometry
            .bounding_rect()
            .ok_or_else(|| Error::InvalidRegion("region has no extent".into()))?;
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return Err(Error::InvalidRegion(format!(
                "region extent is degenerate ({} x {})",
                rect.width(),
                rect.height()
            )));
        }
        Ok(rect)
    }
}

#[cfg(test)]
mod tests {
    use geo::{polygon, MultiPolygon, Polygon};

    use super::*;

    fn unit_square() -> Polygon<f64> {
        polygon![
            (x: 0.0, y: 0.0),
            (x: 2.0, y: 0.0),
            (x: 2.0, y: 1.0),
            (x: 0.0, y: 1.0),
        ]
    }

    #[test]
    fn bounding_rect_spans_all_parts() {
        let other = polygon![
            (x: 5.0, y: 5.0),
            (x: 6.0, y: 5.0),
            (x: 6.0, y: 7.0),
        ];
        let region = Region::planar(MultiPolygon::new(vec![unit_square(), other])).unwrap();
        let rect = region.bounding_rect().unwrap();
        assert_eq!(rect.min().x, 0.0);
        assert_eq!(rect.min().y, 0.0);
        assert_eq!(rect.max().x, 6.0);
        assert_eq!(rect.max().y, 7.0);
    }

    #[test]
    fn empty_region_is_rejected() {
        let err = Region::planar(MultiPolygon::<f64>::new(vec![])).unwrap_err();
        assert!(matches!(err, Error::InvalidRegion(_)));
    }

    #[test]
    fn flat_region_has_degenerate_extent() {
        let line_like = polygon![
            (x: 0.0, y: 0.0),
            (x: 3.0, y: 0.0),
            (x: 1.0, y: 0.0),
        ];
        let region = Region::planar(line_like).unwrap();
        assert!(matches!(
            region.bounding_rect().unwrap_err(),
            Error::InvalidRegion(_)
        ));
    }

    #[test]
    fn non_finite_coordinates_are_geometry_errors() {
        let bad = polygon![
            (x: 0.0, y: 0.0),
            (x: f64::NAN, y: 0.0),
            (x: 1.0, y: 1.0),
        ];
        assert!(matches!(
            Region::planar(bad).unwrap_err(),
            Error::Geometry(_)
        ));
    }

    #[test]
    fn wgs84_constructor_sets_geographic_crs() {
        let region = Region::wgs84(unit_square()).unwrap();
        assert!(region.crs().is_geographic());
        assert_eq!(region.crs(), Crs::WGS84);
    }
}
