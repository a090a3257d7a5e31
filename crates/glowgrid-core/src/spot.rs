//! Colors and light spots.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};

/// An 8-bit RGB color, serialized as `[r, g, b]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    pub const MAGENTA: Rgb = Rgb(255, 0, 255);
    pub const CYAN: Rgb = Rgb(0, 255, 255);
    pub const ORANGE: Rgb = Rgb(255, 180, 0);

    /// Channels as an array in r, g, b order.
    pub const fn channels(self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }

    /// Sum of the three channels.
    pub fn total(self) -> u16 {
        self.0 as u16 + self.1 as u16 + self.2 as u16
    }

    /// Multiply every channel by `factor`, truncating into `0..=255`.
    pub fn scaled(self, factor: f64) -> Rgb {
        let scale = |c: u8| (c as f64 * factor).clamp(0.0, 255.0) as u8;
        Rgb(scale(self.0), scale(self.1), scale(self.2))
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgb(r, g, b)
    }
}

/// A Gaussian light source composited into a raster.
///
/// Spots are only built through [`Spot::new`], so every spot in the system
/// has a finite position and a strictly positive sigma.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spot {
    x: f64,
    y: f64,
    sigma: f64,
    color: Rgb,
}

impl Spot {
    /// Create a spot centred on `(x, y)` in pixel units.
    pub fn new(x: f64, y: f64, sigma: f64, color: Rgb) -> Result<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(ConfigurationError::InvalidSigma(sigma));
        }
        if !x.is_finite() || !y.is_finite() {
            return Err(ConfigurationError::NonFinitePosition(x, y));
        }
        Ok(Self { x, y, sigma, color })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn color(&self) -> Rgb {
        self.color
    }
}
