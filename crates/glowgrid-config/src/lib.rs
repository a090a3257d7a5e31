//! Configuration file support for the glowgrid player.
//!
//! The configuration lives in `config.toml` under the platform config
//! directory (see [`Config::default_path`]). Every section and every field
//! is optional; anything left out takes its default.

mod error;
mod sections;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use glowgrid_core::MAX_GRID_DIMENSION;
use serde::{Deserialize, Serialize};

pub use error::ConfigError;
pub use sections::{
    ClockConfig, CrossingConfig, DisplayConfig, ImageConfig, Motion, ShowConfig, SpiralConfig,
    StarConfig,
};

/// Full player configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub show: ShowConfig,
    pub spiral: SpiralConfig,
    pub star: StarConfig,
    pub clock: ClockConfig,
    pub crossing: CrossingConfig,
    pub image: ImageConfig,
}

impl Config {
    /// `<config dir>/glowgrid/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "glowgrid").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load from `path`, or from [`Config::default_path`] when `path` is `None`.
    ///
    /// A missing default file gives the default configuration; a missing
    /// explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write to `path`, creating missing parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }
        fs::write(path, self.to_toml()?).map_err(|e| ConfigError::io(path, e))
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.display.frame_interval_ms)
    }

    /// Time each animation is shown, `None` when it runs until stopped.
    pub fn show_duration(&self) -> Option<Duration> {
        bounded(self.show.duration_secs)
    }

    /// Runtime of the clock inside a show.
    pub fn clock_duration(&self) -> Option<Duration> {
        self.clock
            .duration_secs
            .map_or_else(|| self.show_duration(), bounded)
    }

    /// Runtime of the crossing blobs inside a show.
    pub fn crossing_duration(&self) -> Option<Duration> {
        self.crossing
            .duration_secs
            .map_or_else(|| self.show_duration(), bounded)
    }

    /// Runtime of the star, a multiple of the show duration.
    pub fn star_duration(&self) -> Option<Duration> {
        bounded(self.show.duration_secs * self.star.duration_factor)
    }

    /// Reject values no show can be played with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let display = &self.display;
        if display.frame_interval_ms == 0 {
            return invalid("display.frame_interval_ms must be positive");
        }
        for (name, value) in [("width", display.width), ("height", display.height)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return invalid(format!(
                    "display.{name} must be between 1 and {MAX_GRID_DIMENSION}, got {value}"
                ));
            }
        }
        if !display.target_max_channel_sum.is_finite() {
            return invalid("display.target_max_channel_sum must be finite");
        }

        if self.show.animations.is_empty() {
            return invalid("show.animations must name at least one animation");
        }
        let durations = [
            ("show.duration_secs", Some(self.show.duration_secs)),
            ("clock.duration_secs", self.clock.duration_secs),
            ("crossing.duration_secs", self.crossing.duration_secs),
            ("star.duration_factor", Some(self.star.duration_factor)),
        ];
        for (name, value) in durations {
            if let Some(value) = value.filter(|v| !(v.is_finite() && *v >= 0.0)) {
                return invalid(format!("{name} must not be negative, got {value}"));
            }
        }

        if self.crossing.frames == 0 {
            return invalid("crossing.frames must be positive");
        }
        if !(0.0..=1.0).contains(&self.image.max_brightness) {
            return invalid(format!(
                "image.max_brightness must be between 0 and 1, got {}",
                self.image.max_brightness
            ));
        }
        Ok(())
    }
}

/// Zero seconds means no limit.
fn bounded(secs: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(secs)
        .ok()
        .filter(|d| !d.is_zero())
}

fn invalid<T>(message: impl Into<String>) -> Result<T, ConfigError> {
    Err(ConfigError::Invalid(message.into()))
}
