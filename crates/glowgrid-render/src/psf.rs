//! Point-spread functions.

use std::f64::consts::{PI, SQRT_2};

use glowgrid_core::{PsfMode, Spot};

/// Gaussian weight of `spot` sampled at `(cx, cy)`, 1.0 at the spot centre.
pub fn exact_gaussian(cx: f64, cy: f64, spot: &Spot) -> f64 {
    let dx = cx - spot.x();
    let dy = cy - spot.y();
    let two_sigma_sq = 2.0 * spot.sigma() * spot.sigma();
    (-(dx * dx + dy * dy) / two_sigma_sq).exp()
}

/// Fraction of a 1D unit Gaussian centred on `mu` that falls in `[lo, hi]`.
fn interval_mass(lo: f64, hi: f64, mu: f64, recip_sigma: f64) -> f64 {
    0.5 * (libm::erf((hi - mu) * recip_sigma) - libm::erf((lo - mu) * recip_sigma))
}

/// Gaussian mass of `spot` inside the unit square with corner `(px, py)`.
///
/// Scaled by `2πσ²` so a wide spot weighs the same as [`exact_gaussian`] at
/// its centre.
pub fn pixel_integral(px: f64, py: f64, spot: &Spot) -> f64 {
    let sigma = spot.sigma();
    let recip_sigma = 1.0 / (sigma * SQRT_2);
    let mass_x = interval_mass(px, px + 1.0, spot.x(), recip_sigma);
    let mass_y = interval_mass(py, py + 1.0, spot.y(), recip_sigma);
    mass_x * mass_y * 2.0 * PI * sigma * sigma
}

/// Weight of `spot` on pixel `(px, py)` under `mode`.
pub fn weight(mode: PsfMode, px: usize, py: usize, spot: &Spot) -> f64 {
    let (px, py) = (px as f64, py as f64);
    match mode {
        PsfMode::ExactGaussian => exact_gaussian(px + 0.5, py + 0.5, spot),
        PsfMode::PixelIntegral => pixel_integral(px, py, spot),
    }
}
