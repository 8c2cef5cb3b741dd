//! Tunable engine parameters and their validation.

use std::f32::consts::{FRAC_PI_3, PI};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("ray count must be at least 1")]
    ZeroRayCount,
    #[error("pixel step must be at least 1")]
    ZeroPixelStep,
    #[error("field of view must be in (0, pi), got {0}")]
    FieldOfView(f32),
    #[error("max render distance must be positive, got {0}")]
    RenderDistance(f32),
    #[error("march step must be in (0, 1), got {0}")]
    MarchStep(f32),
    #[error("grid size must be at least {min}, got {got}")]
    GridTooSmall { min: usize, got: usize },
}

/// Quality knobs for the column raycaster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub ray_count: u32,
    pub pixel_step: u32,
    pub fov: f32,
    pub max_distance: f32,
    pub march_step: f32,
}

impl RenderConfig {
    pub fn desktop() -> Self {
        Self { ray_count: 240, pixel_step: 2, fov: FRAC_PI_3, max_distance: 20.0, march_step: 0.02 }
    }

    pub fn constrained() -> Self {
        Self { ray_count: 120, pixel_step: 4, fov: FRAC_PI_3, max_distance: 14.0, march_step: 0.04 }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ray_count == 0 {
            return Err(ConfigError::ZeroRayCount);
        }
        if self.pixel_step == 0 {
            return Err(ConfigError::ZeroPixelStep);
        }
        if !(self.fov > 0.0 && self.fov < PI) {
            return Err(ConfigError::FieldOfView(self.fov));
        }
        if !(self.max_distance > 0.0 && self.max_distance.is_finite()) {
            return Err(ConfigError::RenderDistance(self.max_distance));
        }
        if !(self.march_step > 0.0 && self.march_step < 1.0) {
            return Err(ConfigError::MarchStep(self.march_step));
        }
        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::desktop()
    }
}

pub const MIN_GRID_SIZE: usize = 16;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid_size: usize,
    pub render: RenderConfig,
    /// Radians of turn per unit of look axis per second, on top of the base turn rate.
    pub look_sensitivity: f32,
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < MIN_GRID_SIZE {
            return Err(ConfigError::GridTooSmall { min: MIN_GRID_SIZE, got: self.grid_size });
        }
        self.render.validate()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { grid_size: 30, render: RenderConfig::desktop(), look_sensitivity: 1.0 }
    }
}
