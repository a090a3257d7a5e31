//! Core types for the glowgrid LED animation engine.
//!
//! Everything here is plain data shared by the renderer, the animation
//! generators and the player: colors, light spots, rasters and the
//! normalized frames handed to a display sink.

mod error;
mod frame;
mod kind;
mod spot;

pub use error::{ConfigurationError, Result};
pub use frame::{NormalizedFrame, PsfMode, Raster};
pub use kind::AnimationKind;
pub use spot::{Rgb, Spot};

/// Width of the LED hat.
pub const GRID_WIDTH: usize = 8;

/// Height of the LED hat.
pub const GRID_HEIGHT: usize = 8;

/// Largest grid dimension the renderer accepts.
pub const MAX_GRID_DIMENSION: usize = 64;

/// Ratio between a Gaussian's full width at half maximum and its sigma.
pub const FWHM_PER_SIGMA: f64 = 2.35;

/// Convert a full width at half maximum into a Gaussian sigma.
pub fn fwhm_to_sigma(fwhm: f64) -> f64 {
    fwhm / FWHM_PER_SIGMA
}
