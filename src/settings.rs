//! Game settings
//!
//! Loaded from a JSON file by the native runner. Missing fields fall back to
//! defaults and out-of-range values are replaced with a warning.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MAX_LEVEL_SECONDS;
use crate::sim::generator::{LevelProfile, default_levels};

/// Highest presentation rate the headless runner will simulate
pub const MAX_FRAME_RATE: f32 = 1000.0;

/// Settings loading failures
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed for level generation
    pub seed: u64,
    /// Built-in level table
    pub levels: Vec<LevelProfile>,

    // === Headless runner ===
    /// Let the autopilot play
    pub autopilot: bool,
    /// Presentation rate to simulate (frames per second)
    pub frame_rate: f32,
    /// Per-level tick cap
    pub max_ticks: u64,

    /// Record cosmetic effect events
    pub effects: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            levels: default_levels(),
            autopilot: true,
            frame_rate: 60.0,
            max_ticks: 20_000,
            effects: true,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Replace unusable values with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if self.levels.is_empty() || self.levels.iter().any(|l| l.seconds == 0) {
            log::warn!("Level table empty or has zero-length levels, using built-in levels");
            self.levels = defaults.levels;
        }
        for level in self.levels.iter_mut().filter(|l| l.seconds > MAX_LEVEL_SECONDS) {
            log::warn!("Level length {}s capped at {}s", level.seconds, MAX_LEVEL_SECONDS);
            level.seconds = MAX_LEVEL_SECONDS;
        }
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            log::warn!("Invalid frame rate {}, using {}", self.frame_rate, defaults.frame_rate);
            self.frame_rate = defaults.frame_rate;
        } else if self.frame_rate > MAX_FRAME_RATE {
            log::warn!("Frame rate {} capped at {}", self.frame_rate, MAX_FRAME_RATE);
            self.frame_rate = MAX_FRAME_RATE;
        }
        if self.max_ticks == 0 {
            self.max_ticks = defaults.max_ticks;
        }
        self
    }
}
