//! Errors raised while validating spots, frames and animation setups.

/// Result alias used across the glowgrid crates.
pub type Result<T, E = ConfigurationError> = std::result::Result<T, E>;

/// An impossible or malformed configuration of the engine.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("spot sigma must be positive and finite, got {0}")]
    InvalidSigma(f64),

    #[error("spot position must be finite, got ({0}, {1})")]
    NonFinitePosition(f64, f64),

    #[error("grid dimensions {width}x{height} are outside 1..={max}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        max: usize,
    },

    #[error("expected {expected} pixels, got {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },

    #[error("brightness must be within [0, 1], got {0}")]
    InvalidBrightness(f64),

    #[error("frame interval must be greater than zero")]
    InvalidFrameInterval,

    #[error("color palette is empty")]
    EmptyPalette,

    #[error("radius range ({0}, {1}) must satisfy rmin < rmax and rmax > 0")]
    InvalidRadii(f64, f64),

    #[error("fwhm must be positive and finite, got {0}")]
    InvalidFwhm(f64),

    #[error("unknown animation '{0}'")]
    UnknownAnimation(String),

    #[error("{0}")]
    Invalid(String),
}
