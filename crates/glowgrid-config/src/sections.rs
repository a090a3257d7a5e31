//! One struct per section of the config file.

use std::path::PathBuf;

use glowgrid_core::{AnimationKind, PsfMode, Rgb};
use serde::{Deserialize, Serialize};

/// `[display]`: the grid and how frames reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub frame_interval_ms: u64,
    /// Brightest `r + g + b` shown at full brightness.
    pub target_max_channel_sum: f64,
    pub psf: PsfMode,
    pub background: Rgb,
    pub width: usize,
    pub height: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 50,
            target_max_channel_sum: 80.0,
            psf: PsfMode::default(),
            background: Rgb::BLACK,
            width: 8,
            height: 8,
        }
    }
}

/// `[show]`: which animations play, for how long, how often.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowConfig {
    pub animations: Vec<AnimationKind>,
    /// Time each animation is shown before moving on, 0 shows the first
    /// animation until the show is stopped.
    pub duration_secs: f64,
    /// Passes over the animation list, 0 plays forever.
    pub loops: u32,
    /// Seed for the random spiral choices, random when unset.
    pub seed: Option<u64>,
    /// File whose removal stops the show.
    pub run_flag: Option<PathBuf>,
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            animations: vec![
                AnimationKind::Spiral,
                AnimationKind::Star,
                AnimationKind::Pudding,
                AnimationKind::Angel,
            ],
            duration_secs: 2.0,
            loops: 0,
            seed: None,
            run_flag: Some(std::env::temp_dir().join(".glowgrid")),
        }
    }
}

/// How spiral rings advance between frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Motion {
    /// By the time the frame took.
    #[default]
    Continuous,
    /// By one frame interval per frame.
    FixedStep,
}

/// `[spiral]`: unset values are chosen at random for every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralConfig {
    pub colors: Vec<Rgb>,
    pub max_colors: usize,
    pub fwhm: Option<f64>,
    pub radius_range: Option<[f64; 2]>,
    /// Rounded to the nearest multiple of the palette size.
    pub arm_count: Option<usize>,
    pub twist_deg: Option<f64>,
    pub angular_velocity_deg: Option<f64>,
    pub angular_velocity_range_deg: Option<[f64; 2]>,
    pub motion: Motion,
}

impl Default for SpiralConfig {
    fn default() -> Self {
        Self {
            colors: vec![
                Rgb::RED,
                Rgb::GREEN,
                Rgb::BLUE,
                Rgb::YELLOW,
                Rgb::MAGENTA,
                Rgb::CYAN,
                Rgb::ORANGE,
            ],
            max_colors: 7,
            fwhm: None,
            radius_range: None,
            arm_count: None,
            twist_deg: None,
            angular_velocity_deg: None,
            angular_velocity_range_deg: None,
            motion: Motion::Continuous,
        }
    }
}

/// `[star]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarConfig {
    pub colors: Vec<Rgb>,
    pub arm_count: usize,
    pub radius_range: [f64; 2],
    /// Spot sigma at the centre.
    pub inner_sigma: f64,
    /// Spot sigma at the outer radius.
    pub outer_sigma: f64,
    pub twist_deg: f64,
    /// Degrees per second, one turn per show duration when unset.
    pub angular_velocity_deg: Option<f64>,
    /// Star runtime as a multiple of the show duration.
    pub duration_factor: f64,
    pub motion: Motion,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            colors: vec![Rgb::YELLOW, Rgb::WHITE, Rgb::ORANGE],
            arm_count: 5,
            radius_range: [1.25, 3.75],
            inner_sigma: 1.25,
            outer_sigma: 0.5,
            twist_deg: 5.0,
            angular_velocity_deg: None,
            duration_factor: 2.0,
            motion: Motion::FixedStep,
        }
    }
}

/// `[clock]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub fwhm: f64,
    pub speed_up: f64,
    /// Runtime inside a show, the show duration when unset, endless for 0.
    pub duration_secs: Option<f64>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            fwhm: 2.0,
            speed_up: 1.0,
            duration_secs: None,
        }
    }
}

/// `[crossing]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossingConfig {
    /// Frames in one sweep across the grid.
    pub frames: u32,
    pub fwhm: f64,
    pub duration_secs: Option<f64>,
}

impl Default for CrossingConfig {
    fn default() -> Self {
        Self {
            frames: 50,
            fwhm: 6.0,
            duration_secs: None,
        }
    }
}

/// `[image]`: fades and orientation of the built-in pictures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub fade_in_ms: u64,
    pub fade_out_ms: u64,
    pub max_brightness: f64,
    /// Clockwise quarter turns applied to every picture.
    pub quarter_turns: u8,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            fade_in_ms: 500,
            fade_out_ms: 500,
            max_brightness: 0.4,
            quarter_turns: 1,
        }
    }
}
