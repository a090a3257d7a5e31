//! Animation generators for the glowgrid LED hat.
//!
//! Every generator produces, per frame, either a list of light spots for the
//! renderer or a finished frame. [`FrameLoop`] plays one [`Animation`] on a
//! [`DisplaySink`] at a fixed frame interval until it completes or is
//! cancelled.

mod animation;
mod clock;
mod crossing;
mod frame_loop;
mod palette;
mod spiral;
mod still;

pub use animation::{Animation, FrameContent, Tick};
pub use clock::{ClockFace, ClockParams, Hand, hand_angle};
pub use crossing::{CrossingBlobs, CrossingParams};
pub use frame_loop::{DisplaySink, FrameLoop, RunOutcome};
pub use palette::{sample_without_replacement, unique_colors};
pub use spiral::{
    AngularMotion, MAX_ARMS, MAX_PALETTE, MAX_RINGS, MIN_FWHM, Spiral, SpiralParams, SpiralStyle,
    arms_for_palette, ring_count, round_to_palette,
};
pub use still::{FadeProfile, StaticImage};
