use std::path::{Path, PathBuf};

use anyhow::Context;
use geo::{BoundingRect, Contains, Coord, Point, Rect};
use glam::DVec2;
use image::{Rgb, RgbImage};
use site_grid::region::Region;
use site_grid::render::GridRenderer;
use site_grid::site::SiteGrid;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Installs a stdout subscriber honoring `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Output style for [`render_grid_to_png`].
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Width of the longer image side in pixels.
    pub size_px: u32,
    pub margin_px: u32,
    pub background: [u8; 3],
    pub region_fill: [u8; 3],
    pub cell_stroke: [u8; 3],
    pub point_color: [u8; 3],
    pub point_radius_px: i32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size_px: 768,
            margin_px: 16,
            background: [250, 250, 246],
            region_fill: [170, 205, 235],
            cell_stroke: [60, 60, 60],
            point_color: [210, 50, 40],
            point_radius_px: 3,
        }
    }
}

struct Viewport {
    min: DVec2,
    scale: f64,
    margin: f64,
    height: u32,
}

impl Viewport {
    fn fit(bounds: Rect<f64>, config: &RenderConfig) -> (Self, u32, u32) {
        let span = DVec2::new(bounds.width(), bounds.height());
        let inner = config.size_px.saturating_sub(2 * config.margin_px).max(1) as f64;
        let scale = inner / span.max_element();
        let width = (span.x * scale).ceil() as u32 + 2 * config.margin_px;
        let height = (span.y * scale).ceil() as u32 + 2 * config.margin_px;
        (
            Self {
                min: DVec2::new(bounds.min().x, bounds.min().y),
                scale,
                margin: config.margin_px as f64,
                height,
            },
            width,
            height,
        )
    }

    fn to_px(&self, world: DVec2) -> (i32, i32) {
        let p = (world - self.min) * self.scale;
        (
            (self.margin + p.x).round() as i32,
            (self.height as f64 - self.margin - p.y).round() as i32,
        )
    }

    fn to_world(&self, px: u32, py: u32) -> DVec2 {
        let x = (px as f64 + 0.5 - self.margin) / self.scale;
        let y = (self.height as f64 - self.margin - (py as f64 + 0.5)) / self.scale;
        self.min + DVec2::new(x, y)
    }
}

/// Draws the region, retained cells and candidate points into a PNG.
pub fn render_grid_to_png(
    region: &Region,
    grid: &SiteGrid,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let mut bounds = region.bounding_rect()?;
    for cell in &grid.cells {
        if let Some(r) = cell.bounding_rect() {
            bounds = merge(bounds, r);
        }
    }

    let (view, width, height) = Viewport::fit(bounds, config);
    let mut img = RgbImage::from_pixel(width, height, Rgb(config.background));

    for py in 0..height {
        for px in 0..width {
            let w = view.to_world(px, py);
            if region.geometry().contains(&Point::new(w.x, w.y)) {
                img.put_pixel(px, py, Rgb(config.region_fill));
            }
        }
    }

    for cell in &grid.cells {
        for line in cell.exterior().lines() {
            let a = view.to_px(to_dvec(line.start));
            let b = view.to_px(to_dvec(line.end));
            draw_line(&mut img, a, b, Rgb(config.cell_stroke));
        }
    }

    for point in &grid.points {
        let c = view.to_px(point.position());
        fill_disk(&mut img, c, config.point_radius_px, Rgb(config.point_color));
    }

    let path = path.as_ref();
    img.save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("Wrote {} ({} candidate points).", path.display(), grid.len());
    Ok(())
}

/// [`GridRenderer`] writing each rendered grid to a PNG file.
pub struct PngRenderer {
    pub config: RenderConfig,
    pub path: PathBuf,
    /// Number of images written so far.
    pub written: usize,
}

impl PngRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            config: RenderConfig::default(),
            path: path.into(),
            written: 0,
        }
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }
}

impl GridRenderer for PngRenderer {
    fn render(&mut self, region: &Region, grid: &SiteGrid) {
        match render_grid_to_png(region, grid, &self.config, &self.path) {
            Ok(()) => self.written += 1,
            Err(e) => warn!("Rendering to {} failed: {e:#}.", self.path.display()),
        }
    }
}

fn to_dvec(c: Coord<f64>) -> DVec2 {
    DVec2::new(c.x, c.y)
}

fn merge(a: Rect<f64>, b: Rect<f64>) -> Rect<f64> {
    Rect::new(
        Coord {
            x: a.min().x.min(b.min().x),
            y: a.min().y.min(b.min().y),
        },
        Coord {
            x: a.max().x.max(b.max().x),
            y: a.max().y.max(b.max().y),
        },
    )
}

fn put(img: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

fn draw_line(img: &mut RgbImage, (x0, y0): (i32, i32), (x1, y1): (i32, i32), color: Rgb<u8>) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let (mut x, mut y, mut err) = (x0, y0, dx + dy);
    loop {
        put(img, x, y, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

fn fill_disk(img: &mut RgbImage, (cx, cy): (i32, i32), radius: i32, color: Rgb<u8>) {
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                put(img, cx + dx, cy + dy, color);
            }
        }
    }
}
