//! Overlap threshold with silent clamping.
use crate::error::{Error, Result};

/// Smallest effective overlap threshold.
pub const MIN_OVERLAP: f64 = 0.01;
/// Largest effective overlap threshold.
pub const MAX_OVERLAP: f64 = 1.0;
/// Slack applied when comparing ratios so fully covered cells survive area round-off.
pub const RATIO_TOLERANCE: f64 = 1e-9;

/// Minimum fraction of a cell's area that must lie inside the region.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct OverlapThreshold(f64);

impl OverlapThreshold {
    /// Clamps `requested` into `[MIN_OVERLAP, MAX_OVERLAP]`; NaN is rejected.
    pub fn new(requested: f64) -> Result<Self> {
        if requested.is_nan() {
            return Err(Error::InvalidConfig("overlap_threshold must not be NaN".into()));
        }
        Ok(Self(requested.clamp(MIN_OVERLAP, MAX_OVERLAP)))
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether a cell with the given overlap ratio is retained.
    #[inline]
    pub fn admits(self, ratio: f64) -> bool {
        ratio >= self.0 - RATIO_TOLERANCE
    }
}

impl Default for OverlapThreshold {
    fn default() -> Self {
        Self(MAX_OVERLAP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_into_supported_range() {
        let cases = [
            (-1.0, 0.01),
            (0.0, 0.01),
            (0.005, 0.01),
            (0.01, 0.01),
            (0.5, 0.5),
            (1.0, 1.0),
            (2.0, 1.0),
        ];
        for (requested, expected) in cases {
            let t = OverlapThreshold::new(requested).unwrap();
            assert_eq!(t.value(), expected, "requested {requested}");
            assert_eq!(t.value(), requested.min(1.0).max(0.01));
        }
    }

    #[test]
    fn infinities_clamp_to_bounds() {
        assert_eq!(OverlapThreshold::new(f64::INFINITY).unwrap().value(), 1.0);
        assert_eq!(OverlapThreshold::new(f64::NEG_INFINITY).unwrap().value(), 0.01);
    }

    #[test]
    fn nan_is_rejected() {
        assert!(matches!(
            OverlapThreshold::new(f64::NAN),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn admits_full_cells_despite_round_off() {
        let t = OverlapThreshold::new(1.0).unwrap();
        assert!(t.admits(1.0));
        assert!(t.admits(1.0 - 1e-12));
        assert!(!t.admits(0.999));
        assert!(!OverlapThreshold::default().admits(0.0));
    }
}
