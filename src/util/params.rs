//! Skeletonization parameters.
//!
//! A plain value object handed to the geometry and sampling functions at
//! call time. The radius slots are outputs, written by
//! [`estimate_init_radius`](crate::geom::estimate_init_radius) for the
//! sampling stage that runs after loading.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{Error, Result};

/// Parameters shared by the data manager and the downstream pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkeletonParams {
    /// Scale factor for the initial neighbourhood radius ("Init Radius Para").
    pub init_radius_para: f64,
    /// Target sample count for downsampling ("Down Sample Num").
    pub down_sample_num: usize,
    /// Grid radius published after radius estimation ("CGrid Radius").
    pub cgrid_radius: f64,
    /// Initial radius published after radius estimation ("Initial Radius").
    pub initial_radius: f64,
    /// Seed for random downsampling; `None` draws from the thread RNG.
    pub random_seed: Option<u64>,
}

impl Default for SkeletonParams {
    fn default() -> Self {
        Self {
            init_radius_para: 1.0,
            down_sample_num: 1000,
            cgrid_radius: 0.0,
            initial_radius: 0.0,
            random_seed: None,
        }
    }
}

impl SkeletonParams {
    /// Load parameters from a JSON file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::from_open(path, e))?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Save parameters as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Publish a freshly estimated radius to both output slots.
    #[inline]
    pub fn publish_radius(&mut self, radius: f64) {
        self.cgrid_radius = radius;
        self.initial_radius = radius;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let p: SkeletonParams = serde_json::from_str(r#"{ "down_sample_num": 42 }"#).unwrap();
        assert_eq!(p.down_sample_num, 42);
        assert_eq!(p.init_radius_para, 1.0);
        assert_eq!(p.random_seed, None);
    }

    #[test]
    fn test_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");

        let mut p = SkeletonParams::default();
        p.random_seed = Some(7);
        p.publish_radius(0.25);
        p.save(&path).unwrap();

        let back = SkeletonParams::load(&path).unwrap();
        assert_eq!(back, p);
        assert_eq!(back.cgrid_radius, 0.25);
        assert_eq!(back.initial_radius, 0.25);
    }

    #[test]
    fn test_load_missing_file() {
        let err = SkeletonParams::load("/nonexistent/params.json").unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
    }
}
