//! Rotating spiral and star animations (stateful).
//!
//! Both are rings of spots arranged in arms around a centre. Each ring has
//! its own angular offset, staggered from the innermost to the outermost ring
//! by a twist angle so the arms curl; the offsets all advance together while
//! the animation runs. The spiral widens its spots towards the rim, the star
//! sharpens them.

use std::f64::consts::TAU;
use std::time::Duration;

use glowgrid_core::{ConfigurationError, Result, Rgb, Spot, fwhm_to_sigma};
use tracing::debug;

use crate::animation::Tick;
use crate::palette::{sample_without_replacement, unique_colors};

/// Narrowest randomly chosen arm width, in pixels.
pub const MIN_FWHM: f64 = 1.5;

/// Widest arm width that still leaves room for the palette.
const FWHM_CAP: f64 = 3.0;

/// Most arms the 8×8 grid can show without them merging.
pub const MAX_ARMS: usize = 8;

/// Largest palette drawn for one spiral.
pub const MAX_PALETTE: usize = 7;

/// Upper bound on rings, only reached with a tiny configured fwhm.
pub const MAX_RINGS: usize = 64;

/// Smallest spiral spot width, keeps the centre visible.
const MIN_SPIRAL_FWHM: f64 = 0.5;

/// How ring offsets advance between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngularMotion {
    /// Advance by the angular velocity times the time since the last frame.
    Continuous,
    /// Advance by a fixed angle per frame, the angular velocity times
    /// `frame_interval`, however long the frame actually took.
    FixedStep { frame_interval: Duration },
}

/// Spot width rule, which also tells spirals and stars apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpiralStyle {
    /// Sigma proportional to `fwhm · r / rmax`.
    Spiral,
    /// Sigma interpolated from `inner_sigma` at the centre to `outer_sigma`
    /// at `rmax`.
    Star { inner_sigma: f64, outer_sigma: f64 },
}

/// Setup of a spiral or star. `None` fields are drawn at random.
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralParams {
    pub style: SpiralStyle,
    /// Colors the palette is drawn from. Duplicates are ignored.
    pub candidates: Vec<Rgb>,
    /// Largest palette size, clamped to `1..=MAX_PALETTE`.
    pub max_colors: usize,
    pub centre: (f64, f64),
    /// Inner and outer ring radius.
    pub radius_range: Option<(f64, f64)>,
    pub fwhm: Option<f64>,
    pub arm_count: Option<usize>,
    /// Angle between the innermost and outermost ring, in degrees.
    pub twist_deg: Option<f64>,
    /// Signed angular velocity in degrees per second.
    pub angular_velocity_deg: Option<f64>,
    /// Bounds for a random angular velocity. Derived from `duration` when unset.
    pub angular_velocity_range_deg: Option<(f64, f64)>,
    pub motion: AngularMotion,
    pub duration: Option<Duration>,
}

impl SpiralParams {
    /// A fully randomized spiral over the seven party colors.
    pub fn spiral() -> Self {
        Self {
            style: SpiralStyle::Spiral,
            candidates: vec![
                Rgb::RED,
                Rgb::GREEN,
                Rgb::BLUE,
                Rgb::YELLOW,
                Rgb::MAGENTA,
                Rgb::CYAN,
                Rgb::ORANGE,
            ],
            max_colors: MAX_PALETTE,
            centre: (4.0, 4.0),
            radius_range: None,
            fwhm: None,
            arm_count: None,
            twist_deg: None,
            angular_velocity_deg: None,
            angular_velocity_range_deg: None,
            motion: AngularMotion::Continuous,
            duration: Some(Duration::from_secs(2)),
        }
    }

    /// A five-pointed star in warm whites, one turn every two seconds.
    pub fn star() -> Self {
        Self {
            style: SpiralStyle::Star {
                inner_sigma: 1.25,
                outer_sigma: 0.5,
            },
            candidates: vec![Rgb::YELLOW, Rgb::WHITE, Rgb::ORANGE],
            max_colors: MAX_PALETTE,
            centre: (4.0, 4.0),
            radius_range: Some((1.25, 3.75)),
            fwhm: None,
            arm_count: Some(5),
            twist_deg: Some(5.0),
            angular_velocity_deg: Some(180.0),
            angular_velocity_range_deg: None,
            motion: AngularMotion::FixedStep {
                frame_interval: Duration::from_millis(50),
            },
            duration: Some(Duration::from_secs(4)),
        }
    }

    fn velocity_range(&self) -> (f64, f64) {
        if let Some(range) = self.angular_velocity_range_deg {
            return range;
        }
        match self.duration {
            Some(d) if !d.is_zero() => {
                let secs = d.as_secs_f64();
                (45.0 / secs, 360.0 / secs)
            }
            _ => (22.5, 180.0),
        }
    }
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self::spiral()
    }
}

/// Largest multiple of `k` not above `max_arms`, and at least `k`.
pub fn arms_for_palette(k: usize, max_arms: f64) -> usize {
    let k = k.max(1);
    let multiples = (max_arms / k as f64).floor() as usize;
    multiples.max(1) * k
}

/// The multiple of `k` nearest to `requested`, within `k..=MAX_ARMS`.
pub fn round_to_palette(requested: usize, k: usize) -> usize {
    let k = k.max(1);
    let largest = (MAX_ARMS / k).max(1) * k;
    ((requested + k / 2) / k * k).clamp(k, largest)
}

/// Number of rings needed so neighbouring rings overlap along an arm.
pub fn ring_count(rmin: f64, rmax: f64, twist: f64, fwhm: f64) -> usize {
    let radial = rmax - rmin;
    let tangential = rmax * twist;
    let arm_length = (radial * radial + tangential * tangential).sqrt();
    let rings = (arm_length / fwhm + 1.0).ceil();
    if rings.is_finite() {
        (rings as usize).clamp(1, MAX_RINGS)
    } else {
        MAX_RINGS
    }
}

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n <= 1 {
        return vec![start];
    }
    (0..n)
        .map(|i| start + (end - start) * i as f64 / (n - 1) as f64)
        .collect()
}

fn random_sign(rng: &mut fastrand::Rng) -> f64 {
    if rng.bool() { 1.0 } else { -1.0 }
}

/// Running spiral or star.
#[derive(Debug, Clone)]
pub struct Spiral {
    style: SpiralStyle,
    palette: Vec<Rgb>,
    centre: (f64, f64),
    rmin: f64,
    rmax: f64,
    fwhm: f64,
    arm_count: usize,
    ring_offsets: Vec<f64>,
    /// Radians per second.
    angular_velocity: f64,
    motion: AngularMotion,
    duration: Option<Duration>,
}

impl Spiral {
    /// Resolve `params` into a running animation, drawing the unset choices
    /// from `rng`.
    pub fn new(params: &SpiralParams, rng: &mut fastrand::Rng) -> Result<Self> {
        let candidates = unique_colors(&params.candidates);
        if candidates.is_empty() {
            return Err(ConfigurationError::EmptyPalette);
        }

        let (rmin, rmax) = match params.radius_range {
            Some((rmin, rmax)) => {
                if !(rmin.is_finite() && rmax.is_finite() && rmin < rmax && rmax > 0.0) {
                    return Err(ConfigurationError::InvalidRadii(rmin, rmax));
                }
                (rmin, rmax)
            }
            None => {
                let rmax = 3.5 + rng.f64();
                let rmin = 0.5 + rng.f64();
                (rmin, rmax)
            }
        };

        if let SpiralStyle::Star {
            inner_sigma,
            outer_sigma,
        } = params.style
        {
            for sigma in [inner_sigma, outer_sigma] {
                if !sigma.is_finite() || sigma <= 0.0 {
                    return Err(ConfigurationError::InvalidSigma(sigma));
                }
            }
        }

        let max_colors = params.max_colors.clamp(1, MAX_PALETTE);
        let k = if max_colors < 2 {
            1
        } else {
            rng.usize(2..=max_colors)
        }
        .min(candidates.len());
        let palette = sample_without_replacement(&candidates, k, rng);

        let circumference = TAU * rmax;
        let fwhm = match params.fwhm {
            Some(fwhm) if fwhm.is_finite() && fwhm > 0.0 => fwhm,
            Some(fwhm) => return Err(ConfigurationError::InvalidFwhm(fwhm)),
            None => {
                let max_fwhm = (circumference / k as f64).min(FWHM_CAP) * 0.5;
                MIN_FWHM + rng.f64() * (max_fwhm - MIN_FWHM)
            }
        };

        let max_arms = (circumference / fwhm).min(MAX_ARMS as f64);
        // Spiral arms cycle through the palette evenly; star points don't have to.
        let arm_count = match (params.arm_count, params.style) {
            (Some(n), SpiralStyle::Spiral) => round_to_palette(n, k),
            (Some(n), SpiralStyle::Star { .. }) => n.clamp(1, MAX_ARMS),
            (None, _) => arms_for_palette(k, max_arms),
        };

        // A twist of at most one arm spacing keeps arms from overlapping.
        let twist = match params.twist_deg {
            Some(deg) => deg.to_radians(),
            None => TAU / arm_count as f64 * rng.f64() * random_sign(rng),
        };
        if !twist.is_finite() {
            return Err(ConfigurationError::Invalid(format!(
                "spiral twist must be finite, got {twist}"
            )));
        }

        let rings = ring_count(rmin, rmax, twist, fwhm);
        let ring_offsets = linspace(0.0, twist, rings);

        let angular_velocity_deg = match params.angular_velocity_deg {
            Some(deg) => deg,
            None => {
                let (lo, hi) = params.velocity_range();
                (lo + rng.f64() * (hi - lo)) * random_sign(rng)
            }
        };
        if !angular_velocity_deg.is_finite() {
            return Err(ConfigurationError::Invalid(format!(
                "angular velocity must be finite, got {angular_velocity_deg}"
            )));
        }

        debug!(
            rmin,
            rmax,
            fwhm,
            colors = k,
            arms = arm_count,
            rings,
            twist_deg = twist.to_degrees(),
            angular_velocity_deg,
            "spiral set up"
        );

        Ok(Self {
            style: params.style,
            palette,
            centre: params.centre,
            rmin,
            rmax,
            fwhm,
            arm_count,
            ring_offsets,
            angular_velocity: angular_velocity_deg.to_radians(),
            motion: params.motion,
            duration: params.duration,
        })
    }

    pub fn name(&self) -> &'static str {
        match self.style {
            SpiralStyle::Spiral => "spiral",
            SpiralStyle::Star { .. } => "star",
        }
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn palette(&self) -> &[Rgb] {
        &self.palette
    }

    pub fn arm_count(&self) -> usize {
        self.arm_count
    }

    pub fn ring_count(&self) -> usize {
        self.ring_offsets.len()
    }

    pub fn fwhm(&self) -> f64 {
        self.fwhm
    }

    pub fn radius_range(&self) -> (f64, f64) {
        (self.rmin, self.rmax)
    }

    /// Current angular offset of every ring, in radians.
    pub fn ring_offsets(&self) -> &[f64] {
        &self.ring_offsets
    }

    /// Signed angular velocity in degrees per second.
    pub fn angular_velocity_deg(&self) -> f64 {
        self.angular_velocity.to_degrees()
    }

    fn ring_radius(&self, ring: usize) -> f64 {
        let rings = self.ring_count();
        if rings == 1 {
            self.rmax
        } else {
            self.rmin.max(0.0) + ring as f64 * (self.rmax - self.rmin) / (rings - 1) as f64
        }
    }

    fn sigma_at(&self, radius: f64) -> f64 {
        let frac = radius / self.rmax;
        match self.style {
            SpiralStyle::Spiral => fwhm_to_sigma((self.fwhm * frac).max(MIN_SPIRAL_FWHM)),
            SpiralStyle::Star {
                inner_sigma,
                outer_sigma,
            } => inner_sigma + (outer_sigma - inner_sigma) * frac,
        }
    }

    /// Spots for the current ring offsets.
    pub fn spots(&self) -> Result<Vec<Spot>> {
        let (cx, cy) = self.centre;
        let arm_spacing = TAU / self.arm_count as f64;
        let mut spots = Vec::with_capacity(self.ring_count() * self.arm_count);

        for (ring, &offset) in self.ring_offsets.iter().enumerate() {
            let radius = self.ring_radius(ring);
            let sigma = self.sigma_at(radius);
            for arm in 0..self.arm_count {
                let theta = offset + arm as f64 * arm_spacing;
                let color = self.palette[arm % self.palette.len()];
                spots.push(Spot::new(
                    cx + radius * theta.cos(),
                    cy + radius * theta.sin(),
                    sigma,
                    color,
                )?);
            }
        }

        Ok(spots)
    }

    /// Rotate every ring for `delta` of real time since the previous frame.
    pub fn advance(&mut self, delta: Duration) {
        let seconds = match self.motion {
            AngularMotion::Continuous => delta.as_secs_f64(),
            AngularMotion::FixedStep { frame_interval } => frame_interval.as_secs_f64(),
        };
        let step = self.angular_velocity * seconds;
        for offset in &mut self.ring_offsets {
            *offset += step;
        }
    }

    /// Advance the rings to `tick`, then emit its spots. The first frame
    /// shows the starting offsets.
    pub fn next_frame(&mut self, tick: Tick) -> Result<Vec<Spot>> {
        if tick.index > 0 {
            self.advance(tick.delta);
        }
        self.spots()
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(2, 8.0, 8)]
    #[case(3, 8.0, 6)]
    #[case(7, 8.0, 7)]
    #[case(3, 5.9, 3)]
    #[case(7, 4.2, 7)]
    #[case(1, 6.5, 6)]
    fn arms_are_multiples_of_the_palette(
        #[case] k: usize,
        #[case] max_arms: f64,
        #[case] expected: usize,
    ) {
        assert_eq!(arms_for_palette(k, max_arms), expected);
    }

    #[rstest]
    #[case(5, 2, 6)]
    #[case(3, 3, 3)]
    #[case(8, 3, 6)]
    #[case(4, 3, 3)]
    #[case(1, 4, 4)]
    #[case(0, 2, 2)]
    #[case(12, 1, 8)]
    #[case(3, 7, 7)]
    fn configured_arms_round_to_the_palette(
        #[case] requested: usize,
        #[case] k: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(round_to_palette(requested, k), expected);
    }

    #[test]
    fn configured_spiral_arms_stay_multiples_of_the_palette() {
        for seed in 0..50 {
            let params = SpiralParams {
                arm_count: Some(5),
                ..SpiralParams::spiral()
            };
            let spiral = Spiral::new(&params, &mut fastrand::Rng::with_seed(seed)).unwrap();
            assert_eq!(spiral.arm_count() % spiral.palette().len(), 0);
        }
    }

    #[test]
    fn linspace_covers_both_ends() {
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(0.0, 1.0, 1), vec![0.0]);
    }

    #[test]
    fn random_spirals_respect_arm_rules() {
        for seed in 0..200 {
            let spiral = Spiral::new(&SpiralParams::spiral(), &mut fastrand::Rng::with_seed(seed)).unwrap();
            let k = spiral.palette().len();
            assert!((2..=MAX_PALETTE).contains(&k));
            assert_eq!(spiral.arm_count() % k, 0);
            assert!(spiral.arm_count() <= MAX_ARMS);
            assert_eq!(unique_colors(spiral.palette()).len(), k);
            let (rmin, rmax) = spiral.radius_range();
            assert!(rmin < rmax);
            assert!(spiral.ring_count() >= 1);
        }
    }

    #[test]
    fn same_seed_gives_identical_frames() {
        let run = |seed| {
            let mut spiral = Spiral::new(&SpiralParams::spiral(), &mut fastrand::Rng::with_seed(seed)).unwrap();
            let mut tick = Tick::first(Duration::from_millis(50));
            let mut frames = Vec::new();
            for _ in 0..10 {
                frames.push(spiral.next_frame(tick).unwrap());
                tick = tick.next();
            }
            frames
        };
        assert_eq!(run(99), run(99));
        assert_ne!(run(99), run(100));
    }

    #[test]
    fn star_geometry() {
        let star = Spiral::new(&SpiralParams::star(), &mut fastrand::Rng::with_seed(3)).unwrap();
        assert_eq!(star.name(), "star");
        assert_eq!(star.arm_count(), 5);
        // Three or fewer colors keep the random fwhm pinned at its minimum.
        assert_eq!(star.fwhm(), MIN_FWHM);
        assert_eq!(star.ring_count(), 3);

        let spots = star.spots().unwrap();
        assert_eq!(spots.len(), 15);
        // Inner ring is soft, outer ring sharp.
        assert!((spots[0].sigma() - 1.0).abs() < 1e-12);
        assert!((spots[14].sigma() - 0.5).abs() < 1e-12);
        // First arm of the inner ring starts on the x axis.
        assert!((spots[0].x() - 5.25).abs() < 1e-12);
        assert!((spots[0].y() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn continuous_motion_follows_the_frame_delta() {
        let params = SpiralParams {
            angular_velocity_deg: Some(90.0),
            ..SpiralParams::spiral()
        };
        let mut spiral = Spiral::new(&params, &mut fastrand::Rng::with_seed(5)).unwrap();
        let before = spiral.ring_offsets().to_vec();
        spiral.advance(Duration::from_millis(500));
        for (b, a) in before.iter().zip(spiral.ring_offsets()) {
            assert!((a - b - FRAC_PI_4).abs() < 1e-12);
        }
    }

    #[test]
    fn fixed_step_ignores_the_frame_delta() {
        let params = SpiralParams {
            angular_velocity_deg: Some(90.0),
            motion: AngularMotion::FixedStep {
                frame_interval: Duration::from_millis(500),
            },
            ..SpiralParams::spiral()
        };
        let mut spiral = Spiral::new(&params, &mut fastrand::Rng::with_seed(5)).unwrap();
        let before = spiral.ring_offsets().to_vec();
        spiral.advance(Duration::from_secs(3));
        for (b, a) in before.iter().zip(spiral.ring_offsets()) {
            assert!((a - b - FRAC_PI_4).abs() < 1e-12);
        }
    }

    #[test]
    fn late_frames_only_move_continuous_spirals_further() {
        let run = |motion| {
            let params = SpiralParams {
                angular_velocity_deg: Some(90.0),
                motion,
                ..SpiralParams::spiral()
            };
            let mut spiral = Spiral::new(&params, &mut fastrand::Rng::with_seed(9)).unwrap();
            let mut tick = Tick::first(Duration::from_millis(50));
            for _ in 0..20 {
                spiral.next_frame(tick).unwrap();
                tick = tick.next().measured(Duration::from_millis(100));
            }
            spiral.ring_offsets()[0]
        };

        let continuous = run(AngularMotion::Continuous);
        let fixed = run(AngularMotion::FixedStep {
            frame_interval: Duration::from_millis(50),
        });
        // Nineteen advances after the first frame.
        assert!((continuous - 19.0 * 0.1 * FRAC_PI_2).abs() < 1e-9);
        assert!((fixed - 19.0 * 0.05 * FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn first_frame_shows_the_starting_offsets() {
        let mut spiral = Spiral::new(&SpiralParams::spiral(), &mut fastrand::Rng::with_seed(4)).unwrap();
        let start = spiral.spots().unwrap();
        let first = spiral.next_frame(Tick::first(Duration::from_millis(50))).unwrap();
        assert_eq!(first, start);
    }

    #[test]
    fn ring_offsets_span_the_twist() {
        let params = SpiralParams {
            twist_deg: Some(45.0),
            radius_range: Some((1.5, 3.5)),
            fwhm: Some(1.0),
            ..SpiralParams::spiral()
        };
        let spiral = Spiral::new(&params, &mut fastrand::Rng::with_seed(11)).unwrap();
        let offsets = spiral.ring_offsets();
        assert_eq!(offsets[0], 0.0);
        assert!((offsets[offsets.len() - 1] - FRAC_PI_4).abs() < 1e-12);
        assert_eq!(offsets.len(), ring_count(1.5, 3.5, FRAC_PI_4, 1.0));
    }

    #[test]
    fn single_color_palette_falls_back_to_one_color() {
        let params = SpiralParams {
            candidates: vec![Rgb::BLUE, Rgb::BLUE],
            ..SpiralParams::spiral()
        };
        let spiral = Spiral::new(&params, &mut fastrand::Rng::with_seed(8)).unwrap();
        assert_eq!(spiral.palette(), &[Rgb::BLUE]);
        assert!(spiral.arm_count() >= 1);
    }

    #[test]
    fn rejects_impossible_setups() {
        let mut rng = fastrand::Rng::with_seed(0);
        let empty = SpiralParams {
            candidates: Vec::new(),
            ..SpiralParams::spiral()
        };
        assert_eq!(
            Spiral::new(&empty, &mut rng).unwrap_err(),
            ConfigurationError::EmptyPalette
        );

        let inverted = SpiralParams {
            radius_range: Some((3.0, 1.0)),
            ..SpiralParams::spiral()
        };
        assert_eq!(
            Spiral::new(&inverted, &mut rng).unwrap_err(),
            ConfigurationError::InvalidRadii(3.0, 1.0)
        );

        let flat = SpiralParams {
            fwhm: Some(-1.0),
            ..SpiralParams::spiral()
        };
        assert_eq!(
            Spiral::new(&flat, &mut rng).unwrap_err(),
            ConfigurationError::InvalidFwhm(-1.0)
        );
    }

    #[test]
    fn velocity_range_follows_duration() {
        let params = SpiralParams {
            duration: Some(Duration::from_secs(4)),
            ..SpiralParams::spiral()
        };
        assert_eq!(params.velocity_range(), (11.25, 90.0));
        let endless = SpiralParams {
            duration: None,
            ..SpiralParams::spiral()
        };
        assert_eq!(endless.velocity_range(), (22.5, 180.0));
    }
}
