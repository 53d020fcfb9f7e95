use std::path::Path;

use anyhow::Context;
use geo::{LineString, MultiPolygon, Polygon};
use serde::Deserialize;
use site_grid::builder::GridConfig;
use site_grid::region::{Crs, Region};

/// One polygon as coordinate tuples; rings are closed automatically.
#[derive(Clone, Debug, Deserialize)]
pub struct PolygonDef {
    pub exterior: Vec<(f64, f64)>,
    #[serde(default)]
    pub holes: Vec<Vec<(f64, f64)>>,
}

impl From<&PolygonDef> for Polygon<f64> {
    fn from(def: &PolygonDef) -> Self {
        Polygon::new(
            LineString::from(def.exterior.clone()),
            def.holes
                .iter()
                .map(|ring| LineString::from(ring.clone()))
                .collect(),
        )
    }
}

/// A grid build described in RON.
#[derive(Clone, Debug, Deserialize)]
pub struct GridJob {
    #[serde(default)]
    pub config: GridConfig,
    pub crs: Crs,
    pub polygons: Vec<PolygonDef>,
    /// Output PNG path when `config.visualize` is set.
    #[serde(default = "default_output")]
    pub output: String,
}

fn default_output() -> String {
    "grid.png".into()
}

impl GridJob {
    pub fn from_ron(text: &str) -> anyhow::Result<Self> {
        ron::from_str(text).context("invalid grid job")
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_ron(&text)
    }

    pub fn region(&self) -> anyhow::Result<Region> {
        let parts: Vec<Polygon<f64>> = self.polygons.iter().map(Polygon::from).collect();
        Ok(Region::new(MultiPolygon::new(parts), self.crs)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_job_parses_into_region() {
        let job = GridJob::from_ron(include_str!("../jobs/reservoir.ron")).unwrap();
        assert_eq!(job.config.resolution, 250.0);
        assert!(job.config.visualize);
        assert_eq!(job.crs, Crs::Planar);
        let region = job.region().unwrap();
        assert_eq!(region.geometry().0.len(), 1);
        assert_eq!(region.geometry().0[0].interiors().len(), 1);
    }

    #[test]
    fn missing_config_uses_defaults() {
        let job = GridJob::from_ron(
            "(crs: Planar, polygons: [(exterior: [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)])])",
        )
        .unwrap();
        assert_eq!(job.config.resolution, 500.0);
        assert_eq!(job.config.overlap_threshold, 1.0);
        assert_eq!(job.output, "grid.png");
    }
}
