//! Spot compositing for the glowgrid LED hat.
//!
//! [`render`] turns a list of [`Spot`]s into a floating point [`Raster`] and
//! [`normalize`] brings that raster into hardware range together with a
//! global brightness scalar. [`Renderer`] bundles both steps with the
//! settings of one display.

mod normalize;
mod psf;
mod raster;

use glowgrid_core::{GRID_HEIGHT, GRID_WIDTH, NormalizedFrame, PsfMode, Result, Rgb, Spot};

pub use normalize::{DEFAULT_TARGET_MAX_CHANNEL_SUM, normalize};
pub use psf::{exact_gaussian, pixel_integral, weight};
pub use raster::{CULL_RADIUS_SIGMAS, is_culled, render};

/// Display settings shared by every spot frame of a show.
#[derive(Debug, Clone, PartialEq)]
pub struct Renderer {
    pub width: usize,
    pub height: usize,
    pub background: Rgb,
    pub psf: PsfMode,
    /// Brightest `r + g + b` the hardware should see at full scale.
    pub target_max_channel_sum: f64,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            background: Rgb::BLACK,
            psf: PsfMode::default(),
            target_max_channel_sum: DEFAULT_TARGET_MAX_CHANNEL_SUM,
        }
    }
}

impl Renderer {
    /// Rasterize `spots` and normalize the result.
    pub fn render_frame(&self, spots: &[Spot]) -> Result<NormalizedFrame> {
        let raster = render(spots, self.width, self.height, self.background, self.psf)?;
        normalize(&raster, self.target_max_channel_sum)
    }

    /// The frame a cleared display shows.
    pub fn cleared(&self) -> NormalizedFrame {
        NormalizedFrame::cleared(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_frame_dims_and_brightness() {
        let renderer = Renderer::default();
        let spot = Spot::new(4.0, 4.0, 1.0, Rgb::WHITE).unwrap();
        let frame = renderer.render_frame(&[spot]).unwrap();
        assert_eq!(frame.width(), 8);
        assert_eq!(frame.height(), 8);
        assert!(frame.brightness() > 0.0 && frame.brightness() <= 1.0);
    }

    #[test]
    fn empty_spot_list_on_black_is_dark() {
        let frame = Renderer::default().render_frame(&[]).unwrap();
        assert!(frame.is_cleared());
    }
}
