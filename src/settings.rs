//! Game settings
//!
//! Loaded once at startup from an optional JSON file. Missing fields fall back
//! to the defaults in [`crate::consts`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::tuning::Tuning;

/// Environment variable naming a settings file
pub const SETTINGS_ENV_VAR: &str = "TINY_GOLF_SETTINGS";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playfield width in world units
    pub screen_width: f32,
    /// Playfield height in world units
    pub screen_height: f32,
    /// Target ticks per second
    pub frame_rate: u32,
    /// Pause after a win, in milliseconds
    pub win_pause_ms: u64,
    /// Fixed scene seed (random when absent)
    pub seed: Option<u64>,
    /// Physics and scene balance
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            frame_rate: FRAME_RATE,
            win_pause_ms: WIN_PAUSE_MS,
            seed: None,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file and validate them
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Resolve the settings source: explicit path, then the environment, then defaults
    ///
    /// Whatever comes back has been validated.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        if let Some(path) = std::env::var_os(SETTINGS_ENV_VAR) {
            return Self::from_file(Path::new(&path));
        }
        log::info!("Using default settings");
        Ok(Self::default())
    }

    /// Check ranges the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        let t = &self.tuning;
        let invalid = |field: &'static str, reason: String| -> Result<(), SettingsError> {
            Err(SettingsError::Invalid { field, reason })
        };

        if self.frame_rate == 0 {
            return invalid("frame_rate", "must be at least 1".into());
        }
        if !(t.ball_size > 0.0) {
            return invalid("tuning.ball_size", format!("must be positive, got {}", t.ball_size));
        }
        if !(t.friction > 0.0 && t.friction <= 1.0) {
            return invalid("tuning.friction", format!("must be in (0, 1], got {}", t.friction));
        }
        if t.min_velocity < 0.0 {
            return invalid(
                "tuning.min_velocity",
                format!("must not be negative, got {}", t.min_velocity),
            );
        }
        if t.obstacle_min_size == 0 || t.obstacle_min_size >= t.obstacle_max_size {
            return invalid(
                "tuning.obstacle_min_size",
                format!(
                    "need 0 < min < max, got {}..{}",
                    t.obstacle_min_size, t.obstacle_max_size
                ),
            );
        }
        if t.max_placement_attempts == 0 {
            return invalid("tuning.max_placement_attempts", "must be at least 1".into());
        }
        let max_obstacle = t.obstacle_max_size as f32;
        if self.screen_width <= max_obstacle || self.screen_height <= max_obstacle {
            return invalid(
                "screen_width/screen_height",
                format!(
                    "{}x{} must exceed the largest obstacle side {}",
                    self.screen_width, self.screen_height, max_obstacle
                ),
            );
        }
        if self.screen_width <= t.ball_size || self.screen_height <= t.ball_size {
            return invalid(
                "screen_width/screen_height",
                format!("must exceed the ball size {}", t.ball_size),
            );
        }
        Ok(())
    }

    /// Duration of one scheduler iteration
    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs(1) / self.frame_rate
    }

    /// Pause shown after sinking the ball
    pub fn win_pause(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.win_pause_ms)
    }
}
