//! Turns the configuration into animations and plays them in order.

use std::time::Duration;

use glowgrid_animations::{
    AngularMotion, Animation, ClockFace, ClockParams, CrossingBlobs, CrossingParams, DisplaySink,
    FadeProfile, FrameLoop, MAX_PALETTE, Spiral, SpiralParams, SpiralStyle, StaticImage,
};
use glowgrid_config::{Config, Motion};
use glowgrid_core::{AnimationKind, ConfigurationError, GRID_HEIGHT, GRID_WIDTH};
use glowgrid_render::Renderer;
use tracing::info;

/// Totals of a finished show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShowSummary {
    pub animations: usize,
    pub frames: u64,
    pub cancelled: bool,
}

pub fn renderer(config: &Config) -> Renderer {
    let display = &config.display;
    Renderer {
        width: display.width,
        height: display.height,
        background: display.background,
        psf: display.psf,
        target_max_channel_sum: display.target_max_channel_sum,
    }
}

fn motion(motion: Motion, config: &Config) -> AngularMotion {
    match motion {
        Motion::Continuous => AngularMotion::Continuous,
        Motion::FixedStep => AngularMotion::FixedStep {
            frame_interval: config.frame_interval(),
        },
    }
}

fn centre(config: &Config) -> (f64, f64) {
    (
        config.display.width as f64 / 2.0,
        config.display.height as f64 / 2.0,
    )
}

fn spiral_params(config: &Config) -> SpiralParams {
    let spiral = &config.spiral;
    SpiralParams {
        style: SpiralStyle::Spiral,
        candidates: spiral.colors.clone(),
        max_colors: spiral.max_colors,
        centre: centre(config),
        radius_range: spiral.radius_range.map(|[lo, hi]| (lo, hi)),
        fwhm: spiral.fwhm,
        arm_count: spiral.arm_count,
        twist_deg: spiral.twist_deg,
        angular_velocity_deg: spiral.angular_velocity_deg,
        angular_velocity_range_deg: spiral.angular_velocity_range_deg.map(|[lo, hi]| (lo, hi)),
        motion: motion(spiral.motion, config),
        duration: config.show_duration(),
    }
}

fn star_params(config: &Config) -> SpiralParams {
    let star = &config.star;
    let show_secs = config.show.duration_secs;
    // One full turn per show duration.
    let default_velocity = if show_secs > 0.0 { 360.0 / show_secs } else { 180.0 };
    let [rmin, rmax] = star.radius_range;
    SpiralParams {
        style: SpiralStyle::Star {
            inner_sigma: star.inner_sigma,
            outer_sigma: star.outer_sigma,
        },
        candidates: star.colors.clone(),
        max_colors: MAX_PALETTE,
        centre: centre(config),
        radius_range: Some((rmin, rmax)),
        fwhm: None,
        arm_count: Some(star.arm_count),
        twist_deg: Some(star.twist_deg),
        angular_velocity_deg: Some(star.angular_velocity_deg.unwrap_or(default_velocity)),
        angular_velocity_range_deg: None,
        motion: motion(star.motion, config),
        duration: config.star_duration(),
    }
}

fn picture(kind: AnimationKind, config: &Config) -> Result<StaticImage, ConfigurationError> {
    let picture = glowgrid_images::picture(kind.name())
        .ok_or_else(|| ConfigurationError::UnknownAnimation(kind.name().to_string()))?;
    let rotated = glowgrid_images::rotate(picture, config.image.quarter_turns);
    let fade = FadeProfile {
        fade_in: Duration::from_millis(config.image.fade_in_ms),
        hold: FadeProfile::default().hold,
        fade_out: Duration::from_millis(config.image.fade_out_ms),
        max_brightness: config.image.max_brightness,
    };
    // Pictures always end, holding for the default time in an endless show.
    let fade = match config.show_duration() {
        Some(show) => fade.fitted_to(show),
        None => fade,
    };
    StaticImage::new(
        kind.name(),
        GRID_WIDTH,
        GRID_HEIGHT,
        glowgrid_images::to_pixels(&rotated),
        fade,
    )
}

/// Set up a fresh run of `kind`, drawing random choices from `rng`.
pub fn build_animation(
    kind: AnimationKind,
    config: &Config,
    rng: &mut fastrand::Rng,
) -> Result<Animation, ConfigurationError> {
    let animation = match kind {
        AnimationKind::Spiral => Spiral::new(&spiral_params(config), rng)?.into(),
        AnimationKind::Star => Spiral::new(&star_params(config), rng)?.into(),
        AnimationKind::Clock => ClockFace::new(ClockParams {
            centre: centre(config),
            fwhm: config.clock.fwhm,
            speed_up: config.clock.speed_up,
            duration: config.clock_duration(),
            ..ClockParams::default()
        })?
        .into(),
        AnimationKind::CrossingBlobs => CrossingBlobs::new(CrossingParams {
            frames: config.crossing.frames,
            fwhm: config.crossing.fwhm,
            extent: config.display.width as f64,
            duration: config.crossing_duration(),
            ..CrossingParams::default()
        })?
        .into(),
        AnimationKind::Pudding | AnimationKind::Angel => picture(kind, config)?.into(),
    };
    Ok(animation)
}

/// Play the configured animations `loops` times (forever for 0) or until
/// `cancel` says stop.
pub fn play<S, C>(
    config: &Config,
    frame_loop: &FrameLoop,
    rng: &mut fastrand::Rng,
    sink: &mut S,
    mut cancel: C,
) -> Result<ShowSummary, S::Error>
where
    S: DisplaySink,
    C: FnMut() -> Result<bool, S::Error>,
{
    let loops = config.show.loops;
    let mut summary = ShowSummary::default();
    let mut pass = 0;

    while loops == 0 || pass < loops {
        info!(pass = pass + 1, loops, "starting show pass");
        for &kind in &config.show.animations {
            let mut animation = build_animation(kind, config, rng)?;
            let outcome = frame_loop.run(&mut animation, sink, &mut cancel)?;
            summary.animations += 1;
            summary.frames += outcome.frames();
            if outcome.is_cancelled() {
                summary.cancelled = true;
                return Ok(summary);
            }
        }
        pass += 1;
    }
    Ok(summary)
}
