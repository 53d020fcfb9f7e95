//! Grid construction and overlap filtering stages.
//!
//! - [`raster`]: extent raster and polygonization with stable cell indices
//! - [`overlap`]: equal-area overlap ratios per cell
//! - [`threshold`]: clamped overlap threshold
pub mod overlap;
pub mod raster;
pub mod threshold;

pub use overlap::{compute_overlaps, CellOverlap};
pub use raster::{CellRaster, GridCell};
pub use threshold::{OverlapThreshold, MAX_OVERLAP, MIN_OVERLAP, RATIO_TOLERANCE};
