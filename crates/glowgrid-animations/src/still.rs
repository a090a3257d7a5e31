//! Still pictures that fade in, hold, and fade out.

use std::time::Duration;

use glowgrid_core::{ConfigurationError, NormalizedFrame, Result, Rgb};

/// Brightness envelope of a still picture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeProfile {
    pub fade_in: Duration,
    pub hold: Duration,
    pub fade_out: Duration,
    /// Brightness while holding, in `[0, 1]`.
    pub max_brightness: f64,
}

impl Default for FadeProfile {
    fn default() -> Self {
        Self {
            fade_in: Duration::from_millis(500),
            hold: Duration::from_secs(1),
            fade_out: Duration::from_millis(500),
            max_brightness: 0.4,
        }
    }
}

impl FadeProfile {
    /// Hold for whatever `show` leaves after both fades, never less than zero.
    pub fn fitted_to(self, show: Duration) -> Self {
        Self {
            hold: show.saturating_sub(self.fade_in + self.fade_out),
            ..self
        }
    }

    pub fn total(&self) -> Duration {
        self.fade_in + self.hold + self.fade_out
    }

    pub fn brightness_at(&self, elapsed: Duration) -> f64 {
        let max = self.max_brightness;
        let t = elapsed.as_secs_f64();
        let fade_in = self.fade_in.as_secs_f64();
        let held = fade_in + self.hold.as_secs_f64();
        let fade_out = self.fade_out.as_secs_f64();

        if t < fade_in {
            max * t / fade_in
        } else if t < held {
            max
        } else if t < held + fade_out {
            max * (1.0 - (t - held) / fade_out)
        } else {
            0.0
        }
    }
}

/// A fixed picture shown without going through the renderer.
#[derive(Debug, Clone)]
pub struct StaticImage {
    name: String,
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
    fade: FadeProfile,
}

impl StaticImage {
    pub fn new(
        name: impl Into<String>,
        width: usize,
        height: usize,
        pixels: Vec<Rgb>,
        fade: FadeProfile,
    ) -> Result<Self> {
        if pixels.len() != width * height {
            return Err(ConfigurationError::PixelCountMismatch {
                expected: width * height,
                actual: pixels.len(),
            });
        }
        let max = fade.max_brightness;
        if !(0.0..=1.0).contains(&max) {
            return Err(ConfigurationError::InvalidBrightness(max));
        }
        Ok(Self {
            name: name.into(),
            width,
            height,
            pixels,
            fade,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fade(&self) -> &FadeProfile {
        &self.fade
    }

    pub fn duration(&self) -> Duration {
        self.fade.total()
    }

    /// The picture at `elapsed`, or a cleared frame once the fade-out is over.
    pub fn frame_at(&self, elapsed: Duration) -> Result<NormalizedFrame> {
        if elapsed >= self.fade.total() {
            return Ok(NormalizedFrame::cleared(self.width, self.height));
        }
        let brightness = self.fade.brightness_at(elapsed);
        NormalizedFrame::new(self.width, self.height, self.pixels.clone(), brightness)
    }
}
