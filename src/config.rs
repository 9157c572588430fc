//! Demo renderer configuration
//!
//! RON-serialized settings: resolution, model path, projection, camera and
//! lighting. A missing or malformed file falls back to defaults so the
//! demo always starts.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use nalgebra_glm::{self as glm, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rasterizer::{Color, RasterSettings};

/// Error type for config loading and saving
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("serialize error: {0}")]
    Serialize(#[from] ron::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    pub model: PathBuf,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub camera_distance: f32,
    /// Model spin around the y axis, degrees per second
    pub rotation_speed: f32,
    pub light_dir: [f32; 3],
    pub base_color: Color,
    pub wireframe_color: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            model: PathBuf::from("assets/cube.obj"),
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
            camera_distance: 20.0,
            rotation_speed: 60.0,
            light_dir: [0.0, 0.0, 1.0],
            base_color: Color::new(205, 205, 205),
            wireframe_color: Color::new(255, 255, 0),
        }
    }
}

impl RenderConfig {
    /// Load from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<RenderConfig, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(ron::from_str(&contents)?)
    }

    /// Load from a RON file, falling back to defaults if that fails.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> RenderConfig {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("config {}: {} (using defaults)", path.display(), e);
                RenderConfig::default()
            }
        }
    }

    /// Write back out as pretty RON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// The light direction as a unit vector. A zero vector in the file
    /// falls back to the head-on default.
    pub fn light_dir(&self) -> Vec3 {
        let v = glm::vec3(self.light_dir[0], self.light_dir[1], self.light_dir[2]);
        if glm::length(&v) > 0.0 {
            glm::normalize(&v)
        } else {
            glm::vec3(0.0, 0.0, 1.0)
        }
    }

    /// Rasterization settings for this configuration.
    pub fn raster_settings(&self) -> RasterSettings {
        RasterSettings {
            width: self.width,
            height: self.height,
            light_dir: self.light_dir(),
            base_color: self.base_color,
        }
    }
}
