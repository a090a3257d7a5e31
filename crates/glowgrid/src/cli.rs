use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use glowgrid_config::Config;
use glowgrid_core::{AnimationKind, PsfMode};

/// Animated light shows for an 8x8 RGB LED hat
///
/// Plays spirals, stars, a clock, crossing blobs and pictures, previewed in
/// the terminal.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file, defaults to config.toml in the platform config directory
    #[arg(short, long, global = true, env = "GLOWGRID_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Play the show (the default)
    Play(PlayArgs),
    /// Stop a running show by lowering its run flag
    Stop,
    /// Print the effective configuration
    Config {
        /// Also write it to the config file
        #[arg(long)]
        save: bool,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Play(PlayArgs::default())
    }
}

/// Overrides for the configured show.
#[derive(Debug, Default, Args)]
pub struct PlayArgs {
    /// Animations to play, in order
    #[arg(value_name = "ANIMATION")]
    pub animations: Vec<AnimationKind>,
    /// Seconds each animation is shown
    #[arg(short, long, value_name = "SECONDS")]
    pub duration_secs: Option<f64>,
    /// Milliseconds between frames
    #[arg(long, value_name = "MILLIS")]
    pub dt_ms: Option<u64>,
    /// Passes over the animation list, 0 for forever
    #[arg(short = 'n', long)]
    pub loops: Option<u32>,
    /// Seed for the random spiral choices
    #[arg(short, long)]
    pub seed: Option<u64>,
    /// Spot profile: exact-gaussian or pixel-integral
    #[arg(long)]
    pub psf: Option<PsfMode>,
    /// Spiral arm width in pixels
    #[arg(long)]
    pub fwhm: Option<f64>,
    /// Clock speed-up factor
    #[arg(long)]
    pub speed_up: Option<f64>,
    /// Log frames instead of drawing them
    #[arg(long)]
    pub headless: bool,
    /// File whose removal stops the show
    #[arg(long, value_name = "FILE", conflicts_with = "no_run_flag")]
    pub run_flag: Option<PathBuf>,
    /// Ignore the run flag
    #[arg(long)]
    pub no_run_flag: bool,
}

impl PlayArgs {
    /// Layer the command line over `config`.
    pub fn apply(&self, config: &mut Config) {
        if !self.animations.is_empty() {
            config.show.animations = self.animations.clone();
        }
        if let Some(duration) = self.duration_secs {
            config.show.duration_secs = duration;
        }
        if let Some(dt) = self.dt_ms {
            config.display.frame_interval_ms = dt;
        }
        if let Some(loops) = self.loops {
            config.show.loops = loops;
        }
        if self.seed.is_some() {
            config.show.seed = self.seed;
        }
        if let Some(psf) = self.psf {
            config.display.psf = psf;
        }
        if self.fwhm.is_some() {
            config.spiral.fwhm = self.fwhm;
        }
        if let Some(speed_up) = self.speed_up {
            config.clock.speed_up = speed_up;
        }
        if self.no_run_flag {
            config.show.run_flag = None;
        } else if self.run_flag.is_some() {
            config.show.run_flag = self.run_flag.clone();
        }
    }
}
