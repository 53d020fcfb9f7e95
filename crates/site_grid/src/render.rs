//! Visualization hook invoked with a finished grid.
use crate::region::Region;
use crate::site::SiteGrid;

/// Receives the region and the finished grid for display.
///
/// Invoked once per build, only when [`crate::builder::GridConfig::visualize`] is set.
/// Rendering never influences the returned grid.
pub trait GridRenderer {
    fn render(&mut self, region: &Region, grid: &SiteGrid);
}

/// A renderer that forwards to a user-provided closure.
pub struct FnRenderer<F>
where
    F: FnMut(&Region, &SiteGrid),
{
    f: F,
}

impl<F> FnRenderer<F>
where
    F: FnMut(&Region, &SiteGrid),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> GridRenderer for FnRenderer<F>
where
    F: FnMut(&Region, &SiteGrid),
{
    fn render(&mut self, region: &Region, grid: &SiteGrid) {
        (self.f)(region, grid);
    }
}
