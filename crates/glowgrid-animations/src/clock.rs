//! Analogue clock face (stateless, computed from the wall clock).

use std::f64::consts::TAU;
use std::time::Duration;

use chrono::{Local, NaiveTime, Timelike};
use glowgrid_core::{ConfigurationError, Result, Rgb, Spot, fwhm_to_sigma};

/// One clock hand, drawn as a single spot at its tip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hand {
    /// Distance of the spot from the clock centre.
    pub radius: f64,
    pub color: Rgb,
}

/// Clock face settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockParams {
    pub centre: (f64, f64),
    /// Spot width shared by all hands.
    pub fwhm: f64,
    /// Multiplier applied to every time component, to watch the hands move.
    pub speed_up: f64,
    pub hour: Hand,
    pub minute: Hand,
    pub second: Hand,
    pub duration: Option<Duration>,
}

impl Default for ClockParams {
    fn default() -> Self {
        Self {
            centre: (4.0, 4.0),
            fwhm: 2.0,
            speed_up: 1.0,
            hour: Hand {
                radius: 2.5,
                color: Rgb::YELLOW,
            },
            minute: Hand {
                radius: 3.0,
                color: Rgb::CYAN,
            },
            second: Hand {
                radius: 3.5,
                color: Rgb::MAGENTA,
            },
            duration: None,
        }
    }
}

/// Angle of a hand, clockwise from twelve o'clock, in `[0, 2π)`.
pub fn hand_angle(value: f64, speed_up: f64, period: f64) -> f64 {
    (value * speed_up).rem_euclid(period) / period * TAU
}

/// Clock face animation.
#[derive(Debug, Clone)]
pub struct ClockFace {
    params: ClockParams,
    now: fn() -> NaiveTime,
}

fn local_time() -> NaiveTime {
    Local::now().time()
}

impl ClockFace {
    pub fn new(params: ClockParams) -> Result<Self> {
        if !params.fwhm.is_finite() || params.fwhm <= 0.0 {
            return Err(ConfigurationError::InvalidFwhm(params.fwhm));
        }
        if !params.speed_up.is_finite() {
            return Err(ConfigurationError::Invalid(format!(
                "clock speed-up must be finite, got {}",
                params.speed_up
            )));
        }
        Ok(Self {
            params,
            now: local_time,
        })
    }

    /// Read the time from `now` instead of the local wall clock.
    pub fn with_time_source(mut self, now: fn() -> NaiveTime) -> Self {
        self.now = now;
        self
    }

    pub fn params(&self) -> &ClockParams {
        &self.params
    }

    pub fn duration(&self) -> Option<Duration> {
        self.params.duration
    }

    /// Hour, minute and second hand angles for `time`.
    pub fn hand_angles<T: Timelike>(&self, time: &T) -> [f64; 3] {
        let speed_up = self.params.speed_up;
        [
            hand_angle(time.hour() as f64, speed_up, 12.0),
            hand_angle(time.minute() as f64, speed_up, 60.0),
            hand_angle(time.second() as f64, speed_up, 60.0),
        ]
    }

    /// Spots for the three hands at `time`.
    pub fn spots_at<T: Timelike>(&self, time: &T) -> Result<Vec<Spot>> {
        let (cx, cy) = self.params.centre;
        let sigma = fwhm_to_sigma(self.params.fwhm);
        let hands = [self.params.hour, self.params.minute, self.params.second];

        hands
            .iter()
            .zip(self.hand_angles(time))
            .map(|(hand, theta)| {
                Spot::new(
                    cx + hand.radius * theta.sin(),
                    cy + hand.radius * theta.cos(),
                    sigma,
                    hand.color,
                )
            })
            .collect()
    }

    pub fn next_frame(&self) -> Result<Vec<Spot>> {
        self.spots_at(&(self.now)())
    }
}
