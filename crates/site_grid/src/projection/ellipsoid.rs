//! Reference ellipsoids for geographic regions.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Rotational ellipsoid described by its semi-major axis and inverse flattening.
///
/// An inverse flattening of `0.0` denotes a sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ellipsoid {
    /// Semi-major axis in meters.
    pub semi_major: f64,
    /// Inverse flattening `1/f`, or `0.0` for a sphere.
    pub inverse_flattening: f64,
}

impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid {
        semi_major: 6_378_137.0,
        inverse_flattening: 298.257_223_563,
    };

    pub const GRS80: Ellipsoid = Ellipsoid {
        semi_major: 6_378_137.0,
        inverse_flattening: 298.257_222_101,
    };

    /// Sphere with the given radius in meters.
    pub fn sphere(radius: f64) -> Self {
        Self {
            semi_major: radius,
            inverse_flattening: 0.0,
        }
    }

    /// Validates the axis and flattening values.
    pub fn validate(&self) -> Result<()> {
        if !self.semi_major.is_finite() || self.semi_major <= 0.0 {
            return Err(Error::InvalidConfig(
                "ellipsoid semi_major must be finite and > 0".into(),
            ));
        }
        if !self.inverse_flattening.is_finite()
            || (self.inverse_flattening != 0.0 && self.inverse_flattening <= 1.0)
        {
            return Err(Error::InvalidConfig(
                "ellipsoid inverse_flattening must be 0 (sphere) or > 1".into(),
            ));
        }
        Ok(())
    }

    /// Flattening `f`.
    pub fn flattening(&self) -> f64 {
        if self.inverse_flattening == 0.0 {
            0.0
        } else {
            1.0 / self.inverse_flattening
        }
    }

    /// First eccentricity squared `e² = f(2 - f)`.
    pub fn eccentricity_squared(&self) -> f64 {
        let f = self.flattening();
        f * (2.0 - f)
    }

    pub fn is_sphere(&self) -> bool {
        self.inverse_flattening == 0.0
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wgs84_eccentricity_matches_reference() {
        let e2 = Ellipsoid::WGS84.eccentricity_squared();
        assert!((e2 - 0.006_694_379_990_14).abs() < 1e-12);
    }

    #[test]
    fn sphere_has_no_flattening() {
        let s = Ellipsoid::sphere(6_371_000.0);
        assert!(s.is_sphere());
        assert_eq!(s.eccentricity_squared(), 0.0);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_axes() {
        assert!(Ellipsoid::sphere(0.0).validate().is_err());
        assert!(Ellipsoid::sphere(f64::NAN).validate().is_err());
        let squashed = Ellipsoid {
            semi_major: 1.0,
            inverse_flattening: 0.5,
        };
        assert!(squashed.validate().is_err());
    }
}
