//! Equal-area projections used for overlap arithmetic.
//!
//! Region and cell geometry are copied into an [`EqualAreaProjection`] before areas are
//! measured; the originals are never modified. Planar regions use [`PlanarArea`] and
//! geographic regions default to a [`LambertAzimuthalEqualArea`] centred on the region.
use std::fmt;
use std::sync::Arc;

use geo::{Coord, LineString, MapCoords, MultiPolygon, Polygon, Rect};

use crate::error::Result;
use crate::region::{Crs, Region};

pub mod ellipsoid;
pub mod laea;

pub use ellipsoid::Ellipsoid;
pub use laea::LambertAzimuthalEqualArea;

/// A projection under which planar polygon area is a valid proxy for true area.
pub trait EqualAreaProjection: Send + Sync + fmt::Debug {
    /// Short identifier used in logs and events.
    fn name(&self) -> &str;

    /// Projects a single coordinate from the region's CRS.
    fn project(&self, coord: Coord<f64>) -> Result<Coord<f64>>;

    /// Maximum ring segment length, in source units, before projection.
    ///
    /// `None` means straight segments stay straight under the projection.
    fn densify_step(&self) -> Option<f64> {
        None
    }

    /// Whether every coordinate of `extent` lies inside the projection's domain.
    fn covers(&self, _extent: &Rect<f64>) -> bool {
        true
    }
}

/// Identity projection for regions whose planar coordinates already measure true area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlanarArea;

impl EqualAreaProjection for PlanarArea {
    fn name(&self) -> &str {
        "planar"
    }

    #[inline]
    fn project(&self, coord: Coord<f64>) -> Result<Coord<f64>> {
        Ok(coord)
    }
}

/// Picks the projection used when the caller does not configure one.
pub fn default_projection_for(region: &Region) -> Result<Arc<dyn EqualAreaProjection>> {
    match region.crs() {
        Crs::Planar => Ok(Arc::new(PlanarArea)),
        Crs::Geographic(ellipsoid) => {
            let center = region.bounding_rect()?.center();
            Ok(Arc::new(LambertAzimuthalEqualArea::new(center, ellipsoid)?))
        }
    }
}

/// Projects a polygon, densifying its rings first when the projection asks for it.
pub fn project_polygon(
    projection: &dyn EqualAreaProjection,
    polygon: &Polygon<f64>,
) -> Result<Polygon<f64>> {
    match projection.densify_step() {
        Some(step) => densify_polygon(polygon, step).try_map_coords(|c| projection.project(c)),
        None => polygon.try_map_coords(|c| projection.project(c)),
    }
}

/// Projects every part of a multi-polygon.
pub fn project_multi_polygon(
    projection: &dyn EqualAreaProjection,
    geometry: &MultiPolygon<f64>,
) -> Result<MultiPolygon<f64>> {
    geometry
        .iter()
        .map(|polygon| project_polygon(projection, polygon))
        .collect::<Result<Vec<_>>>()
        .map(MultiPolygon::new)
}

fn densify_polygon(polygon: &Polygon<f64>, step: f64) -> Polygon<f64> {
    Polygon::new(
        densify_ring(polygon.exterior(), step),
        polygon
            .interiors()
            .iter()
            .map(|ring| densify_ring(ring, step))
            .collect(),
    )
}

fn densify_ring(ring: &LineString<f64>, step: f64) -> LineString<f64> {
    let mut out: Vec<Coord<f64>> = Vec::with_capacity(ring.0.len());
    for line in ring.lines() {
        let delta = line.delta();
        let length = delta.x.hypot(delta.y);
        let pieces = (length / step).ceil().max(1.0) as usize;
        out.push(line.start);
        for k in 1..pieces {
            let t = k as f64 / pieces as f64;
            out.push(line.start + delta * t);
        }
    }
    if let Some(last) = ring.0.last() {
        out.push(*last);
    }
    LineString::new(out)
}

#[cfg(test)]
mod tests {
    use geo::{coord, polygon, Area};

    use super::*;

    #[test]
    fn planar_projection_is_identity() {
        let c = coord! { x: 12.5, y: -3.0 };
        assert_eq!(PlanarArea.project(c).unwrap(), c);
        assert_eq!(PlanarArea.densify_step(), None);
        let far = Rect::new(coord! { x: -1e9, y: -1e9 }, coord! { x: 1e9, y: 1e9 });
        assert!(PlanarArea.covers(&far));
    }

    #[test]
    fn densify_preserves_shape_and_closes_ring() {
        let square = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
        ];
        let dense = densify_polygon(&square, 0.25);
        assert_eq!(dense.exterior().0.len(), 17);
        assert_eq!(dense.exterior().0.first(), dense.exterior().0.last());
        assert!((dense.unsigned_area() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn default_projection_follows_crs() {
        let square = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
        ];
        let planar = Region::new(square.clone(), Crs::Planar).unwrap();
        assert_eq!(default_projection_for(&planar).unwrap().name(), "planar");

        let geographic = Region::new(square, Crs::Geographic(Ellipsoid::WGS84)).unwrap();
        assert_eq!(
            default_projection_for(&geographic).unwrap().name(),
            "lambert-azimuthal-equal-area"
        );
    }

    #[test]
    fn projection_errors_propagate_from_rings() {
        let bad = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 400.0),
        ];
        let p = LambertAzimuthalEqualArea::spherical(coord! { x: 0.0, y: 0.0 }, 6_371_000.0)
            .unwrap();
        assert!(project_polygon(&p, &bad).is_err());
    }
}
