use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "sakuragen.toml";

/// Settings for a headless planting run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// World seed; every planting spot derives its own generator from it.
    pub seed: u64,
    /// Size of the in-memory world, `[x, y, z]`.
    pub grid_extent: [usize; 3],
    /// First air layer above the grass.
    pub ground_level: i32,
    /// Number of planting attempts.
    pub trees: usize,
    /// Distance between neighbouring planting spots.
    pub spacing: i32,
    /// Optional JSONL file receiving every voxel write.
    pub placement_log: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            grid_extent: [128, 64, 128],
            ground_level: 16,
            trees: 16,
            spacing: 16,
            placement_log: None,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<GeneratorConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    GeneratorConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                GeneratorConfig::default()
            }
        }
    }

    /// Reject settings that cannot produce a usable world.
    pub fn validate(&self) -> Result<()> {
        let [_, height, _] = self.grid_extent;
        ensure!(self.spacing > 0, "spacing must be positive, got {}", self.spacing);
        ensure!(
            self.ground_level >= 1 && (self.ground_level as usize) < height,
            "ground level {} must sit inside the grid height {height}",
            self.ground_level
        );
        Ok(())
    }
}
