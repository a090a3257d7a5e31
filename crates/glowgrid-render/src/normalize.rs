//! Bringing rasters into hardware range.

use glowgrid_core::{NormalizedFrame, Raster, Result, Rgb};

/// Default `r + g + b` budget of the brightest pixel.
pub const DEFAULT_TARGET_MAX_CHANNEL_SUM: f64 = 80.0;

const CHANNEL_MAX: f64 = 255.0;

/// Scale `raster` into `0..=255` and derive the display brightness.
///
/// Channels are first rescaled together when any of them exceeds 255, so
/// spot colors keep their ratios, then truncated. The brightness is chosen so
/// the brightest pixel's channel sum lands on `target_max_channel_sum`, and
/// never exceeds 1. The display applies it to the whole frame.
pub fn normalize(raster: &Raster, target_max_channel_sum: f64) -> Result<NormalizedFrame> {
    let peak = raster.peak();
    let rescale = peak > CHANNEL_MAX;

    let truncate = |v: f64| {
        let v = if rescale { v / peak * CHANNEL_MAX } else { v };
        v.trunc().clamp(0.0, CHANNEL_MAX) as u8
    };
    let pixels: Vec<Rgb> = raster
        .pixels()
        .iter()
        .map(|&[r, g, b]| Rgb(truncate(r), truncate(g), truncate(b)))
        .collect();

    let max_total = pixels.iter().map(|p| p.total()).max().unwrap_or(0);
    let brightness = if max_total > 0 {
        (target_max_channel_sum / max_total as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };
    // NaN targets end up dark rather than invalid.
    let brightness = if brightness.is_nan() { 0.0 } else { brightness };

    NormalizedFrame::new(raster.width(), raster.height(), pixels, brightness)
}
