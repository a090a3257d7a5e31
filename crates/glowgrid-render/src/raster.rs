//! Compositing spots into a raster.

use glowgrid_core::{ConfigurationError, MAX_GRID_DIMENSION, PsfMode, Raster, Result, Rgb, Spot};
use tracing::trace;

use crate::psf::weight;

/// Spots farther than this many sigmas outside the grid are skipped.
///
/// The weights dropped this way stay below `1e-7`, far below one step of an
/// 8-bit channel.
pub const CULL_RADIUS_SIGMAS: f64 = 6.0;

/// Whether `spot` is too far outside a `width`×`height` grid to matter.
pub fn is_culled(spot: &Spot, width: usize, height: usize) -> bool {
    let gap = |v: f64, extent: usize| (-v).max(v - extent as f64).max(0.0);
    let dx = gap(spot.x(), width);
    let dy = gap(spot.y(), height);
    let radius = CULL_RADIUS_SIGMAS * spot.sigma();
    dx * dx + dy * dy > radius * radius
}

/// Composite `spots` over `background` into a `width`×`height` raster.
///
/// The result is unclamped: overlapping bright spots can exceed 255 and are
/// left for [`normalize`](crate::normalize) to rescale.
pub fn render(
    spots: &[Spot],
    width: usize,
    height: usize,
    background: Rgb,
    psf: PsfMode,
) -> Result<Raster> {
    let valid = 1..=MAX_GRID_DIMENSION;
    if !valid.contains(&width) || !valid.contains(&height) {
        return Err(ConfigurationError::InvalidDimensions {
            width,
            height,
            max: MAX_GRID_DIMENSION,
        });
    }

    let mut raster = Raster::filled(width, height, background);
    let mut culled = 0;
    for spot in spots {
        if is_culled(spot, width, height) {
            culled += 1;
            continue;
        }
        for py in 0..height {
            for px in 0..width {
                raster.accumulate(px, py, weight(psf, px, py, spot), spot.color());
            }
        }
    }
    trace!(spots = spots.len(), culled, %psf, "rasterized spots");

    Ok(raster)
}
