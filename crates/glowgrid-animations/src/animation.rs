//! The animation generator shared by the frame loop.

use std::time::Duration;

use glowgrid_core::{NormalizedFrame, Result, Spot};

use crate::clock::ClockFace;
use crate::crossing::CrossingBlobs;
use crate::spiral::Spiral;
use crate::still::StaticImage;

/// Timing of the frame being generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Frames generated before this one.
    pub index: u64,
    /// Nominal time since the animation started, the sum of frame intervals.
    pub elapsed: Duration,
    /// Time since the previous frame, zero for the first one.
    pub delta: Duration,
    /// Nominal pause between frames.
    pub interval: Duration,
}

impl Tick {
    /// The first frame of an animation paced at `interval`.
    pub fn first(interval: Duration) -> Self {
        Self {
            index: 0,
            elapsed: Duration::ZERO,
            delta: Duration::ZERO,
            interval,
        }
    }

    /// The frame after this one, assuming it arrives on schedule.
    pub fn next(self) -> Self {
        Self {
            index: self.index + 1,
            elapsed: self.elapsed + self.interval,
            delta: self.interval,
            interval: self.interval,
        }
    }

    /// This frame, arriving `delta` after the previous one.
    pub fn measured(self, delta: Duration) -> Self {
        Self { delta, ..self }
    }
}

/// What a generator produced for one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameContent {
    /// Light spots still to be rasterized and normalized.
    Spots(Vec<Spot>),
    /// A finished frame that bypasses the renderer.
    Fixed(NormalizedFrame),
}

/// An animation with its running state.
#[derive(Debug)]
pub enum Animation {
    Clock(ClockFace),
    Spiral(Spiral),
    CrossingBlobs(CrossingBlobs),
    StaticImage(StaticImage),
}

impl Animation {
    pub fn name(&self) -> &str {
        match self {
            Animation::Clock(_) => "clock",
            Animation::Spiral(spiral) => spiral.name(),
            Animation::CrossingBlobs(_) => "crossing-blobs",
            Animation::StaticImage(image) => image.name(),
        }
    }

    /// How long the animation runs, `None` when it runs until cancelled.
    pub fn duration(&self) -> Option<Duration> {
        match self {
            Animation::Clock(clock) => clock.duration(),
            Animation::Spiral(spiral) => spiral.duration(),
            Animation::CrossingBlobs(blobs) => blobs.duration(),
            Animation::StaticImage(image) => Some(image.duration()),
        }
    }

    /// Produce the frame for `tick` and advance the animation state.
    pub fn next_frame(&mut self, tick: Tick) -> Result<FrameContent> {
        match self {
            Animation::Clock(clock) => clock.next_frame().map(FrameContent::Spots),
            Animation::Spiral(spiral) => spiral.next_frame(tick).map(FrameContent::Spots),
            Animation::CrossingBlobs(blobs) => blobs.next_frame().map(FrameContent::Spots),
            Animation::StaticImage(image) => image.frame_at(tick.elapsed).map(FrameContent::Fixed),
        }
    }
}

impl From<ClockFace> for Animation {
    fn from(clock: ClockFace) -> Self {
        Animation::Clock(clock)
    }
}

impl From<Spiral> for Animation {
    fn from(spiral: Spiral) -> Self {
        Animation::Spiral(spiral)
    }
}

impl From<CrossingBlobs> for Animation {
    fn from(blobs: CrossingBlobs) -> Self {
        Animation::CrossingBlobs(blobs)
    }
}

impl From<StaticImage> for Animation {
    fn from(image: StaticImage) -> Self {
        Animation::StaticImage(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_accumulate_nominal_time() {
        let dt = Duration::from_millis(50);
        let first = Tick::first(dt);
        assert_eq!(first.delta, Duration::ZERO);
        let tick = first.next().next();
        assert_eq!(tick.index, 2);
        assert_eq!(tick.elapsed, Duration::from_millis(100));
        assert_eq!(tick.delta, dt);
    }

    #[test]
    fn measured_delta_leaves_elapsed_nominal() {
        let dt = Duration::from_millis(50);
        let late = Tick::first(dt).next().measured(Duration::from_millis(120));
        assert_eq!(late.delta, Duration::from_millis(120));
        assert_eq!(late.elapsed, dt);
        assert_eq!(late.next().elapsed, Duration::from_millis(100));
    }
}
