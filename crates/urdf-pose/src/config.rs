//! Poser configuration
//!
//! Read from a RON file given with `--config`. Missing fields fall back to
//! their defaults.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use urdf_kinematics::{AngleDisplayMode, Pose};

/// Output format for the posed robot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Complete poser configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PoseConfig {
    /// Configuration format version
    pub version: u32,
    /// Unit of angular `--joint` values and printed joint values
    pub angle_display_mode: AngleDisplayMode,
    /// Placement of the root link in the world
    pub base_pose: Pose,
    /// Read STL files referenced by mesh visuals
    pub load_meshes: bool,
    pub output_format: OutputFormat,
}

impl Default for PoseConfig {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            angle_display_mode: AngleDisplayMode::Degrees,
            base_pose: Pose::default(),
            load_meshes: false,
            output_format: OutputFormat::Text,
        }
    }
}

impl PoseConfig {
    /// Current configuration version
    pub const CURRENT_VERSION: u32 = 1;

    /// Load configuration from a file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config = Self::from_ron(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_ron(content: &str) -> Result<Self> {
        Ok(ron::from_str(content)?)
    }
}
