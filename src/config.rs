// SPDX-License-Identifier: GPL-3.0-only

use crate::backends::camera::types::{CameraBackendType, CameraFacing};
use crate::constants::{app_info, preview, transition};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Camera switch transition settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionSettings {
    /// Downsample factor before blurring
    pub blur_scale: f32,
    /// Stack blur radius
    pub blur_radius: u32,
    /// Delay before the overlay is hidden again, in milliseconds
    pub hide_delay_ms: u64,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            blur_scale: transition::BLUR_SCALE,
            blur_radius: transition::BLUR_RADIUS,
            hide_delay_ms: transition::OVERLAY_HIDE_DELAY_MS,
        }
    }
}

impl TransitionSettings {
    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }

    /// Replace out-of-range values with the defaults
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        // NaN fails both comparisons
        let blur_scale = if self.blur_scale > 0.0 && self.blur_scale <= 1.0 {
            self.blur_scale
        } else {
            warn!(blur_scale = self.blur_scale, "Invalid blur scale, using default");
            defaults.blur_scale
        };
        let blur_radius = self.blur_radius.min(transition::MAX_BLUR_RADIUS);
        Self {
            blur_scale,
            blur_radius,
            hide_delay_ms: self.hide_delay_ms,
        }
    }
}

/// Synthetic backend settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticSettings {
    pub width: u32,
    pub height: u32,
    /// Facings the synthetic provider pretends to have
    pub facings: Vec<CameraFacing>,
}

impl Default for SyntheticSettings {
    fn default() -> Self {
        Self {
            width: preview::DEFAULT_WIDTH,
            height: preview::DEFAULT_HEIGHT,
            facings: CameraFacing::ALL.to_vec(),
        }
    }
}

/// Image files backing each facing for the image backend
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSources {
    pub front: Option<PathBuf>,
    pub back: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Camera provider to use
    pub backend: CameraBackendType,
    /// Facing used when the caller does not pick one
    pub default_facing: CameraFacing,
    /// Mirror the front camera preview horizontally (selfie mode)
    pub mirror_front_preview: bool,
    /// Interval between live preview frames; `None` disables frame pumping
    pub preview_frame_interval_ms: Option<u64>,
    pub synthetic: SyntheticSettings,
    pub image_sources: ImageSources,
    pub transition: TransitionSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: CameraBackendType::default(),
            default_facing: CameraFacing::Back,
            mirror_front_preview: true, // Default to mirrored (selfie mode)
            preview_frame_interval_ms: Some(preview::FRAME_INTERVAL_MS),
            synthetic: SyntheticSettings::default(),
            image_sources: ImageSources::default(),
            transition: TransitionSettings::default(),
        }
    }
}

impl Config {
    /// Default config file location
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| {
            dir.join(app_info::CONFIG_DIR_NAME)
                .join(app_info::CONFIG_FILE_NAME)
        })
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            debug!("No config directory, using defaults");
            return Self::default();
        };
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to load config, using defaults"
                );
                Self::default()
            }
        }
    }

    /// Load from a specific file
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        info!(path = %path.display(), "Loaded config");
        Ok(config.sanitized())
    }

    /// Save to the default location
    pub fn save(&self) -> AppResult<()> {
        let path = Self::config_path()
            .ok_or_else(|| AppError::Config("no config directory".to_string()))?;
        self.save_to(&path)
    }

    /// Save to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        info!(path = %path.display(), "Saved config");
        Ok(())
    }

    /// Interval between pumped preview frames
    pub fn preview_frame_interval(&self) -> Option<Duration> {
        self.preview_frame_interval_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    fn sanitized(mut self) -> Self {
        self.transition = self.transition.sanitized();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_scale_falls_back() {
        let settings = TransitionSettings {
            blur_scale: 4.0,
            blur_radius: 1000,
            hide_delay_ms: 10,
        }
        .sanitized();
        assert_eq!(settings.blur_scale, transition::BLUR_SCALE);
        assert_eq!(settings.blur_radius, transition::MAX_BLUR_RADIUS);
        assert_eq!(settings.hide_delay_ms, 10);
    }

    #[test]
    fn zero_interval_disables_pumping() {
        let config = Config {
            preview_frame_interval_ms: Some(0),
            ..Config::default()
        };
        assert_eq!(config.preview_frame_interval(), None);
    }
}
