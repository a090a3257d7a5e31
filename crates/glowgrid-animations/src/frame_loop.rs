//! Time-stepped playback of one animation on a display sink.

use std::time::{Duration, Instant};

use glowgrid_core::{ConfigurationError, NormalizedFrame};
use glowgrid_render::Renderer;
use tracing::{debug, info};

use crate::animation::{Animation, FrameContent, Tick};

/// Something that can show frames: the LED hat, a terminal preview, a log.
pub trait DisplaySink {
    /// Engine errors are converted into the sink's own error type.
    type Error: From<ConfigurationError>;

    fn show(&mut self, frame: &NormalizedFrame) -> Result<(), Self::Error>;

    fn clear(&mut self) -> Result<(), Self::Error>;
}

/// How a run ended and how many frames it showed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The animation reached its duration.
    Completed { frames: u64 },
    /// The cancellation source asked to stop.
    Cancelled { frames: u64 },
}

impl RunOutcome {
    pub fn frames(self) -> u64 {
        match self {
            RunOutcome::Completed { frames } | RunOutcome::Cancelled { frames } => frames,
        }
    }

    pub fn is_cancelled(self) -> bool {
        matches!(self, RunOutcome::Cancelled { .. })
    }
}

/// Drives animations frame by frame at a fixed interval.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    renderer: Renderer,
    frame_interval: Duration,
    sleep: fn(Duration),
    now: fn() -> Instant,
}

impl FrameLoop {
    pub fn new(renderer: Renderer, frame_interval: Duration) -> Result<Self, ConfigurationError> {
        if frame_interval.is_zero() {
            return Err(ConfigurationError::InvalidFrameInterval);
        }
        Ok(Self {
            renderer,
            frame_interval,
            sleep: std::thread::sleep,
            now: Instant::now,
        })
    }

    /// Replace the pause between frames, e.g. with a no-op in tests.
    pub fn with_sleeper(mut self, sleep: fn(Duration)) -> Self {
        self.sleep = sleep;
        self
    }

    /// Replace the clock frame deltas are measured with.
    pub fn with_clock(mut self, now: fn() -> Instant) -> Self {
        self.now = now;
        self
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Play `animation` on `sink` until it completes or `cancel` returns true.
    ///
    /// `cancel` is polled once before every frame. The sink is cleared once
    /// when the run ends either way. Elapsed time is the sum of nominal frame
    /// intervals; only [`Tick::delta`] carries the measured time between
    /// frames.
    pub fn run<S, C>(
        &self,
        animation: &mut Animation,
        sink: &mut S,
        mut cancel: C,
    ) -> Result<RunOutcome, S::Error>
    where
        S: DisplaySink,
        C: FnMut() -> Result<bool, S::Error>,
    {
        let duration = animation.duration();
        info!(animation = animation.name(), ?duration, "starting animation");

        let mut tick = Tick::first(self.frame_interval);
        let mut previous: Option<Instant> = None;
        let outcome = loop {
            if cancel()? {
                break RunOutcome::Cancelled { frames: tick.index };
            }
            if duration.is_some_and(|d| tick.elapsed >= d) {
                break RunOutcome::Completed { frames: tick.index };
            }

            let started = (self.now)();
            if let Some(previous) = previous.replace(started) {
                tick = tick.measured(started.saturating_duration_since(previous));
            }

            let frame = match animation.next_frame(tick)? {
                FrameContent::Spots(spots) => {
                    debug!(frame = tick.index, spots = spots.len(), "rendering spots");
                    self.renderer.render_frame(&spots)?
                }
                FrameContent::Fixed(frame) => frame,
            };
            sink.show(&frame)?;

            (self.sleep)(self.frame_interval);
            tick = tick.next();
        };

        sink.clear()?;
        info!(animation = animation.name(), ?outcome, "animation finished");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;
    use std::sync::OnceLock;
    use std::sync::atomic::{AtomicU32, Ordering};

    use glowgrid_core::Rgb;

    use super::*;
    use crate::crossing::{CrossingBlobs, CrossingParams};
    use crate::spiral::{AngularMotion, Spiral, SpiralParams};
    use crate::still::{FadeProfile, StaticImage};

    #[derive(Debug, PartialEq)]
    enum Event {
        Show(NormalizedFrame),
        Clear,
    }

    #[derive(Debug, Default)]
    struct RecordingSink {
        events: Vec<Event>,
        fail_on_show: bool,
    }

    #[derive(Debug, PartialEq)]
    enum SinkError {
        Engine(ConfigurationError),
        Unplugged,
    }

    impl From<ConfigurationError> for SinkError {
        fn from(err: ConfigurationError) -> Self {
            SinkError::Engine(err)
        }
    }

    impl DisplaySink for RecordingSink {
        type Error = SinkError;

        fn show(&mut self, frame: &NormalizedFrame) -> Result<(), SinkError> {
            if self.fail_on_show {
                return Err(SinkError::Unplugged);
            }
            self.events.push(Event::Show(frame.clone()));
            Ok(())
        }

        fn clear(&mut self) -> Result<(), SinkError> {
            self.events.push(Event::Clear);
            Ok(())
        }
    }

    fn no_sleep(_: Duration) {}

    fn frame_loop() -> FrameLoop {
        FrameLoop::new(Renderer::default(), Duration::from_millis(50))
            .unwrap()
            .with_sleeper(no_sleep)
    }

    fn blobs(duration: Option<Duration>) -> Animation {
        CrossingBlobs::new(CrossingParams {
            duration,
            ..CrossingParams::default()
        })
        .unwrap()
        .into()
    }

    /// A clock on which every frame starts 80ms after the one before.
    fn overrunning_clock() -> Instant {
        static START: OnceLock<Instant> = OnceLock::new();
        static READS: AtomicU32 = AtomicU32::new(0);
        let start = *START.get_or_init(Instant::now);
        start + Duration::from_millis(80) * READS.fetch_add(1, Ordering::Relaxed)
    }

    fn spiral_offset_after_overruns(motion: AngularMotion) -> f64 {
        let params = SpiralParams {
            angular_velocity_deg: Some(90.0),
            motion,
            duration: None,
            ..SpiralParams::spiral()
        };
        let mut animation: Animation = Spiral::new(&params, &mut fastrand::Rng::with_seed(9))
            .unwrap()
            .into();
        let mut polls = 0;
        frame_loop()
            .with_clock(overrunning_clock)
            .run(&mut animation, &mut RecordingSink::default(), || {
                polls += 1;
                Ok(polls > 3)
            })
            .unwrap();
        let Animation::Spiral(spiral) = animation else {
            panic!("expected a spiral");
        };
        spiral.ring_offsets()[0]
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = FrameLoop::new(Renderer::default(), Duration::ZERO).unwrap_err();
        assert_eq!(err, ConfigurationError::InvalidFrameInterval);
    }

    #[test]
    fn bounded_animation_completes_and_clears() {
        let mut sink = RecordingSink::default();
        let mut animation = blobs(Some(Duration::from_millis(200)));
        let outcome = frame_loop()
            .run(&mut animation, &mut sink, || Ok(false))
            .unwrap();

        assert_eq!(outcome, RunOutcome::Completed { frames: 4 });
        assert_eq!(sink.events.len(), 5);
        assert_eq!(sink.events.last(), Some(&Event::Clear));
    }

    #[test]
    fn cancellation_is_polled_per_frame() {
        let mut sink = RecordingSink::default();
        let mut animation = blobs(None);
        let mut polls = 0;
        let outcome = frame_loop()
            .run(&mut animation, &mut sink, || {
                polls += 1;
                Ok(polls > 3)
            })
            .unwrap();

        assert!(outcome.is_cancelled());
        assert_eq!(outcome.frames(), 3);
        assert_eq!(polls, 4);
        let clears = sink.events.iter().filter(|e| **e == Event::Clear).count();
        assert_eq!(clears, 1);
    }

    #[test]
    fn cancelled_before_first_frame_only_clears() {
        let mut sink = RecordingSink::default();
        let outcome = frame_loop()
            .run(&mut blobs(None), &mut sink, || Ok(true))
            .unwrap();
        assert_eq!(outcome, RunOutcome::Cancelled { frames: 0 });
        assert_eq!(sink.events, vec![Event::Clear]);
    }

    #[test]
    fn still_images_bypass_the_renderer() {
        let fade = FadeProfile {
            fade_in: Duration::from_millis(100),
            hold: Duration::from_millis(100),
            fade_out: Duration::from_millis(100),
            max_brightness: 0.5,
        };
        let image = StaticImage::new("red", 8, 8, vec![Rgb::RED; 64], fade).unwrap();
        let mut sink = RecordingSink::default();
        let outcome = frame_loop()
            .run(&mut image.into(), &mut sink, || Ok(false))
            .unwrap();

        assert_eq!(outcome, RunOutcome::Completed { frames: 6 });
        let Event::Show(first) = &sink.events[0] else {
            panic!("expected a frame, got {:?}", sink.events[0]);
        };
        assert_eq!(first.brightness(), 0.0);
        assert_eq!(first.pixel(0, 0), Rgb::RED);
        let Event::Show(held) = &sink.events[2] else {
            panic!("expected a frame, got {:?}", sink.events[2]);
        };
        assert_eq!(held.brightness(), 0.5);
    }

    #[test]
    fn continuous_motion_follows_measured_frame_time() {
        // Three frames, two advances of 80ms instead of the nominal 50ms.
        let continuous = spiral_offset_after_overruns(AngularMotion::Continuous);
        assert!((continuous - 0.16 * FRAC_PI_2).abs() < 1e-9);

        let fixed = spiral_offset_after_overruns(AngularMotion::FixedStep {
            frame_interval: Duration::from_millis(50),
        });
        assert!((fixed - 0.1 * FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn sink_errors_propagate() {
        let mut sink = RecordingSink {
            fail_on_show: true,
            ..RecordingSink::default()
        };
        let err = frame_loop()
            .run(&mut blobs(None), &mut sink, || Ok(false))
            .unwrap_err();
        assert_eq!(err, SinkError::Unplugged);
    }

    #[test]
    fn cancellation_errors_propagate() {
        let mut sink = RecordingSink::default();
        let err = frame_loop()
            .run(&mut blobs(None), &mut sink, || Err(SinkError::Unplugged))
            .unwrap_err();
        assert_eq!(err, SinkError::Unplugged);
        assert!(sink.events.is_empty());
    }
}
