//! Player settings stored as TOML in the platform data directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use delve_core::{GameConfig, RenderConfig};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::APP_NAME;

pub const QUALITY_ENV: &str = "DELVE_QUALITY";
pub const DEFAULT_UI_SCALE: f32 = 1.0;
pub const MIN_UI_SCALE: f32 = 0.5;
pub const MAX_UI_SCALE: f32 = 4.0;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    #[default]
    Desktop,
    Constrained,
}

impl Quality {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "desktop" => Some(Self::Desktop),
            "constrained" => Some(Self::Constrained),
            _ => None,
        }
    }

    pub fn render_config(self) -> RenderConfig {
        match self {
            Self::Desktop => RenderConfig::desktop(),
            Self::Constrained => RenderConfig::constrained(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub quality: Quality,
    pub look_sensitivity: f32,
    pub ui_scale: Option<f32>,
    pub window_width: i32,
    pub window_height: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: Quality::Desktop,
            look_sensitivity: 1.0,
            ui_scale: None,
            window_width: 1000,
            window_height: 750,
        }
    }
}

impl Settings {
    pub fn get_default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
            let mut path = proj_dirs.config_dir().to_path_buf();
            path.push("settings.toml");
            path
        })
    }

    /// Missing file means defaults; a malformed file is an error.
    pub fn load(path: &Path) -> io::Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(error) => return Err(error),
        };
        toml::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        let text = toml::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(&tmp_path, text)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// Applies the quality override from the environment, if it names a preset.
    pub fn with_quality_override(mut self, raw: Option<&str>) -> Self {
        if let Some(quality) = raw.and_then(Quality::parse) {
            self.quality = quality;
        }
        self
    }

    pub fn game_config(&self) -> GameConfig {
        let look_sensitivity =
            if self.look_sensitivity.is_finite() { self.look_sensitivity.clamp(0.1, 5.0) } else { 1.0 };
        GameConfig { render: self.quality.render_config(), look_sensitivity, ..GameConfig::default() }
    }
}

pub fn clamp_ui_scale(value: f32) -> f32 {
    if !value.is_finite() {
        return DEFAULT_UI_SCALE;
    }
    value.clamp(MIN_UI_SCALE, MAX_UI_SCALE)
}

/// Saved scale wins; otherwise follow the display DPI when it is above 1.
pub fn resolve_ui_scale(dpi_scale: f32, saved_ui_scale: Option<f32>) -> f32 {
    if let Some(scale) = saved_ui_scale {
        return clamp_ui_scale(scale);
    }
    if dpi_scale.is_finite() && dpi_scale > 1.0 {
        return clamp_ui_scale(dpi_scale);
    }
    DEFAULT_UI_SCALE
}
