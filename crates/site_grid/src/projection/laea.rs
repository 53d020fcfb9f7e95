//! Lambert azimuthal equal-area projection on an ellipsoid.
//!
//! Forward formulas use the authalic latitude so that planar area equals ellipsoidal
//! surface area for any aspect (polar, equatorial or oblique).
use geo::{Coord, Rect};

use super::ellipsoid::Ellipsoid;
use super::EqualAreaProjection;
use crate::error::{Error, Result};

/// Default densification step for geographic rings, in degrees.
pub const DEFAULT_DENSIFY_DEGREES: f64 = 0.05;

const SPHERE_EPS: f64 = 1e-12;
const ANTIPODE_EPS: f64 = 1e-12;

/// Lambert azimuthal equal-area projection centred on a longitude/latitude in degrees.
///
/// Input coordinates are `(longitude, latitude)` in degrees; output is planar meters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LambertAzimuthalEqualArea {
    ellipsoid: Ellipsoid,
    center: Coord<f64>,
    densify_degrees: f64,
    lon0: f64,
    e: f64,
    qp: f64,
    rq: f64,
    d: f64,
    sin_beta1: f64,
    cos_beta1: f64,
}

impl LambertAzimuthalEqualArea {
    /// Creates a projection centred at `center` (`x` = longitude, `y` = latitude, degrees).
    pub fn new(center: Coord<f64>, ellipsoid: Ellipsoid) -> Result<Self> {
        ellipsoid.validate()?;
        if !center.x.is_finite() || !center.y.is_finite() {
            return Err(Error::InvalidConfig(
                "projection centre must be finite".into(),
            ));
        }
        if center.y.abs() > 90.0 {
            return Err(Error::InvalidConfig(format!(
                "projection centre latitude {} is outside [-90, 90]",
                center.y
            )));
        }

        let a = ellipsoid.semi_major;
        let e = ellipsoid.eccentricity_squared().sqrt();
        let qp = authalic_q(1.0, e);
        let rq = a * (qp / 2.0).sqrt();

        let phi1 = center.y.to_radians();
        let beta1 = (authalic_q(phi1.sin(), e) / qp).clamp(-1.0, 1.0).asin();
        let (sin_beta1, cos_beta1) = beta1.sin_cos();

        let d = if cos_beta1.abs() < SPHERE_EPS {
            1.0
        } else {
            let sin_phi1 = phi1.sin();
            let m1 = phi1.cos() / (1.0 - e * e * sin_phi1 * sin_phi1).sqrt();
            a * m1 / (rq * cos_beta1)
        };

        Ok(Self {
            ellipsoid,
            center,
            densify_degrees: DEFAULT_DENSIFY_DEGREES,
            lon0: center.x.to_radians(),
            e,
            qp,
            rq,
            d,
            sin_beta1,
            cos_beta1,
        })
    }

    /// Spherical variant with the given radius in meters.
    pub fn spherical(center: Coord<f64>, radius: f64) -> Result<Self> {
        Self::new(center, Ellipsoid::sphere(radius))
    }

    /// Sets the maximum ring segment length (degrees) before projection.
    ///
    /// Non-positive or non-finite values disable densification.
    pub fn with_densify_degrees(mut self, degrees: f64) -> Self {
        self.densify_degrees = degrees;
        self
    }

    /// Projection centre as `(longitude, latitude)` degrees.
    pub fn center(&self) -> Coord<f64> {
        self.center
    }

    pub fn ellipsoid(&self) -> Ellipsoid {
        self.ellipsoid
    }

    /// Radius of the sphere with the same surface area as the ellipsoid.
    pub fn authalic_radius(&self) -> f64 {
        self.rq
    }

    fn authalic_latitude(&self, phi: f64) -> f64 {
        (authalic_q(phi.sin(), self.e) / self.qp)
            .clamp(-1.0, 1.0)
            .asin()
    }
}

impl EqualAreaProjection for LambertAzimuthalEqualArea {
    fn name(&self) -> &str {
        "lambert-azimuthal-equal-area"
    }

    fn project(&self, coord: Coord<f64>) -> Result<Coord<f64>> {
        if !coord.x.is_finite() || !coord.y.is_finite() {
            return Err(Error::Geometry(format!(
                "non-finite coordinate ({}, {})",
                coord.x, coord.y
            )));
        }
        if coord.y.abs() > 90.0 {
            return Err(Error::Geometry(format!(
                "latitude {} is outside [-90, 90]; region is not in degrees",
                coord.y
            )));
        }

        let lambda = coord.x.to_radians() - self.lon0;
        let beta = self.authalic_latitude(coord.y.to_radians());
        let (sin_beta, cos_beta) = beta.sin_cos();
        let (sin_lambda, cos_lambda) = lambda.sin_cos();

        let denom = 1.0 + self.sin_beta1 * sin_beta + self.cos_beta1 * cos_beta * cos_lambda;
        if denom <= ANTIPODE_EPS {
            return Err(Error::Geometry(format!(
                "coordinate ({}, {}) is antipodal to the projection centre",
                coord.x, coord.y
            )));
        }

        let b = self.rq * (2.0 / denom).sqrt();
        Ok(Coord {
            x: b * self.d * cos_beta * sin_lambda,
            y: (b / self.d)
                * (self.cos_beta1 * sin_beta - self.sin_beta1 * cos_beta * cos_lambda),
        })
    }

    fn covers(&self, extent: &Rect<f64>) -> bool {
        extent.min().y >= -90.0 && extent.max().y <= 90.0
    }

    fn densify_step(&self) -> Option<f64> {
        (self.densify_degrees.is_finite() && self.densify_degrees > 0.0)
            .then_some(self.densify_degrees)
    }
}

/// Snyder's `q` for a given `sin(phi)` and eccentricity.
fn authalic_q(sin_phi: f64, e: f64) -> f64 {
    if e < SPHERE_EPS {
        return 2.0 * sin_phi;
    }
    let e2 = e * e;
    let es = e * sin_phi;
    (1.0 - e2) * (sin_phi / (1.0 - es * es) - (1.0 / (2.0 * e)) * ((1.0 - es) / (1.0 + es)).ln())
}

#[cfg(test)]
mod tests {
    use geo::{coord, Area, Rect};

    use super::*;
    use crate::projection::project_polygon;

    const R: f64 = 6_371_000.0;

    /// Surface area of a lon/lat box on the authalic sphere.
    fn box_area(p: &LambertAzimuthalEqualArea, min: Coord<f64>, max: Coord<f64>) -> f64 {
        let b1 = p.authalic_latitude(min.y.to_radians());
        let b2 = p.authalic_latitude(max.y.to_radians());
        let rq = p.authalic_radius();
        rq * rq * (max.x - min.x).to_radians() * (b2.sin() - b1.sin())
    }

    #[test]
    fn centre_projects_to_origin() {
        let p = LambertAzimuthalEqualArea::new(coord! { x: 10.0, y: 52.0 }, Ellipsoid::WGS84)
            .unwrap();
        let c = p.project(coord! { x: 10.0, y: 52.0 }).unwrap();
        assert!(c.x.abs() < 1e-6 && c.y.abs() < 1e-6, "{c:?}");
    }

    #[test]
    fn sphere_box_area_matches_analytic() {
        let p = LambertAzimuthalEqualArea::spherical(coord! { x: 0.5, y: 0.5 }, R).unwrap();
        let min = coord! { x: 0.0, y: 0.0 };
        let max = coord! { x: 1.0, y: 1.0 };
        let projected = project_polygon(&p, &Rect::new(min, max).to_polygon()).unwrap();
        let expected = R * R * 1f64.to_radians() * 1f64.to_radians().sin();
        let rel = (projected.unsigned_area() - expected).abs() / expected;
        assert!(rel < 1e-5, "relative error {rel}");
    }

    #[test]
    fn ellipsoid_box_area_matches_authalic_band() {
        let p = LambertAzimuthalEqualArea::new(coord! { x: 11.0, y: 48.0 }, Ellipsoid::WGS84)
            .unwrap();
        let min = coord! { x: 10.5, y: 47.5 };
        let max = coord! { x: 11.5, y: 48.5 };
        let projected = project_polygon(&p, &Rect::new(min, max).to_polygon()).unwrap();
        let expected = box_area(&p, min, max);
        let rel = (projected.unsigned_area() - expected).abs() / expected;
        assert!(rel < 1e-5, "relative error {rel}");
    }

    #[test]
    fn polar_centre_is_supported() {
        let p = LambertAzimuthalEqualArea::new(coord! { x: 0.0, y: 90.0 }, Ellipsoid::WGS84)
            .unwrap();
        let c = p.project(coord! { x: 45.0, y: 80.0 }).unwrap();
        assert!(c.x.is_finite() && c.y.is_finite());
        assert!(c.x > 0.0 && c.y < 0.0);
    }

    #[test]
    fn antipode_is_rejected() {
        let p = LambertAzimuthalEqualArea::spherical(coord! { x: 0.0, y: 0.0 }, R).unwrap();
        let err = p.project(coord! { x: 180.0, y: 0.0 }).unwrap_err();
        assert!(matches!(err, Error::Geometry(_)));
    }

    #[test]
    fn out_of_range_latitude_is_rejected() {
        let p = LambertAzimuthalEqualArea::spherical(coord! { x: 0.0, y: 0.0 }, R).unwrap();
        assert!(p.project(coord! { x: 0.0, y: 500.0 }).is_err());
        assert!(LambertAzimuthalEqualArea::spherical(coord! { x: 0.0, y: 91.0 }, R).is_err());
    }

    #[test]
    fn domain_stops_at_the_poles() {
        let p = LambertAzimuthalEqualArea::spherical(coord! { x: 0.0, y: 0.0 }, R).unwrap();
        let cap = Rect::new(coord! { x: -10.0, y: 80.0 }, coord! { x: 370.0, y: 90.0 });
        assert!(p.covers(&cap));
        let past = Rect::new(coord! { x: 0.0, y: 89.5 }, coord! { x: 1.0, y: 90.5 });
        assert!(!p.covers(&past));
        let south = Rect::new(coord! { x: 0.0, y: -90.2 }, coord! { x: 1.0, y: -89.0 });
        assert!(!p.covers(&south));
    }

    #[test]
    fn densify_step_can_be_disabled() {
        let p = LambertAzimuthalEqualArea::spherical(coord! { x: 0.0, y: 0.0 }, R)
            .unwrap()
            .with_densify_degrees(0.0);
        assert_eq!(p.densify_step(), None);
    }
}
