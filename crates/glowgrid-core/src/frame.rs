//! Rasters and normalized frames.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};
use crate::spot::Rgb;

/// How a spot's intensity is sampled onto a pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PsfMode {
    /// Gaussian evaluated at the pixel centre.
    #[default]
    ExactGaussian,
    /// Gaussian mass integrated over the pixel's unit square.
    PixelIntegral,
}

impl PsfMode {
    pub fn name(self) -> &'static str {
        match self {
            PsfMode::ExactGaussian => "exact-gaussian",
            PsfMode::PixelIntegral => "pixel-integral",
        }
    }
}

impl fmt::Display for PsfMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PsfMode {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "exact-gaussian" | "exact" => Ok(PsfMode::ExactGaussian),
            "pixel-integral" | "erf" => Ok(PsfMode::PixelIntegral),
            other => Err(ConfigurationError::Invalid(format!(
                "unknown psf mode '{other}'"
            ))),
        }
    }
}

/// Floating point RGB accumulators, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    data: Vec<[f64; 3]>,
}

impl Raster {
    /// A raster with every pixel set to `background`.
    pub fn filled(width: usize, height: usize, background: Rgb) -> Self {
        let [r, g, b] = background.channels();
        Self {
            width,
            height,
            data: vec![[r as f64, g as f64, b as f64]; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Accumulated channels of pixel `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> [f64; 3] {
        self.data[y * self.width + x]
    }

    /// Add `weight × color` to pixel `(x, y)`.
    pub fn accumulate(&mut self, x: usize, y: usize, weight: f64, color: Rgb) {
        let px = &mut self.data[y * self.width + x];
        for (acc, c) in px.iter_mut().zip(color.channels()) {
            *acc += weight * c as f64;
        }
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[[f64; 3]] {
        &self.data
    }

    /// Largest channel value anywhere in the raster.
    pub fn peak(&self) -> f64 {
        self.data
            .iter()
            .flat_map(|px| px.iter().copied())
            .fold(0.0, f64::max)
    }
}

/// A frame in hardware range, ready for a display sink.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFrame {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
    brightness: f64,
}

impl NormalizedFrame {
    /// Build a frame from row-major pixels and a global brightness.
    pub fn new(width: usize, height: usize, pixels: Vec<Rgb>, brightness: f64) -> Result<Self> {
        if pixels.len() != width * height {
            return Err(ConfigurationError::PixelCountMismatch {
                expected: width * height,
                actual: pixels.len(),
            });
        }
        if !(0.0..=1.0).contains(&brightness) {
            return Err(ConfigurationError::InvalidBrightness(brightness));
        }
        Ok(Self {
            width,
            height,
            pixels,
            brightness,
        })
    }

    /// The all-black frame shown when a display is cleared.
    pub fn cleared(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
            brightness: 0.0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn brightness(&self) -> f64 {
        self.brightness
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> {
        self.pixels.chunks(self.width.max(1))
    }

    /// Largest `r + g + b` of any pixel.
    pub fn max_channel_sum(&self) -> u16 {
        self.pixels.iter().map(|p| p.total()).max().unwrap_or(0)
    }

    /// Whether nothing would light up on the display.
    pub fn is_cleared(&self) -> bool {
        self.brightness == 0.0 && self.pixels.iter().all(|p| *p == Rgb::BLACK)
    }
}
