//! Five wide blobs sweeping across the grid along mirrored paths.

use std::time::Duration;

use glowgrid_core::{ConfigurationError, GRID_WIDTH, Result, Rgb, Spot, fwhm_to_sigma};

#[derive(Debug, Clone, PartialEq)]
pub struct CrossingParams {
    /// Frames in one sweep from `start` to `end`.
    pub frames: u32,
    pub start: (f64, f64),
    pub end: (f64, f64),
    pub fwhm: f64,
    /// One color per blob, in path order.
    pub colors: [Rgb; 5],
    /// Size of the square the paths are mirrored in.
    pub extent: f64,
    pub duration: Option<Duration>,
}

impl Default for CrossingParams {
    fn default() -> Self {
        Self {
            frames: 50,
            start: (-4.0, 4.0),
            end: (12.0, 4.0),
            fwhm: 6.0,
            colors: [Rgb::RED, Rgb::GREEN, Rgb::BLUE, Rgb::MAGENTA, Rgb::YELLOW],
            extent: GRID_WIDTH as f64,
            duration: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CrossingBlobs {
    params: CrossingParams,
    sigma: f64,
    frame: u64,
}

impl CrossingBlobs {
    pub fn new(params: CrossingParams) -> Result<Self> {
        if params.frames == 0 {
            return Err(ConfigurationError::Invalid(
                "crossing blobs need at least one frame per sweep".into(),
            ));
        }
        if !params.fwhm.is_finite() || params.fwhm <= 0.0 {
            return Err(ConfigurationError::InvalidFwhm(params.fwhm));
        }
        let (sx, sy) = params.start;
        let (ex, ey) = params.end;
        if ![sx, sy, ex, ey, params.extent].iter().all(|v| v.is_finite()) {
            return Err(ConfigurationError::NonFinitePosition(sx, sy));
        }
        Ok(Self {
            sigma: fwhm_to_sigma(params.fwhm),
            params,
            frame: 0,
        })
    }

    pub fn params(&self) -> &CrossingParams {
        &self.params
    }

    pub fn duration(&self) -> Option<Duration> {
        self.params.duration
    }

    /// Point on the straight sweep for frame `index` of a sweep.
    pub fn control_point(&self, index: u32) -> (f64, f64) {
        let (sx, sy) = self.params.start;
        if self.params.frames == 1 {
            return (sx, sy);
        }
        let (ex, ey) = self.params.end;
        let t = f64::from(index) / f64::from(self.params.frames - 1);
        (sx + t * (ex - sx), sy + t * (ey - sy))
    }

    pub fn spots_for_frame(&self, index: u32) -> Result<Vec<Spot>> {
        let (xc, yc) = self.control_point(index);
        let e = self.params.extent;
        let positions = [
            (xc, yc),
            (yc, xc),
            (e - xc, e - xc),
            (e - xc, xc),
            (xc, e - xc),
        ];
        positions
            .iter()
            .zip(self.params.colors)
            .map(|(&(x, y), color)| Spot::new(x, y, self.sigma, color))
            .collect()
    }

    /// Spots for the current frame; sweeps restart after the last frame.
    pub fn next_frame(&mut self) -> Result<Vec<Spot>> {
        let index = (self.frame % u64::from(self.params.frames)) as u32;
        self.frame += 1;
        self.spots_for_frame(index)
    }
}
