//! The animations a show can be built from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Animation selectable from the command line or the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationKind {
    Clock,
    Spiral,
    Star,
    CrossingBlobs,
    Pudding,
    Angel,
}

impl AnimationKind {
    /// Every animation, in show order.
    pub const ALL: [AnimationKind; 6] = [
        AnimationKind::Spiral,
        AnimationKind::Star,
        AnimationKind::Pudding,
        AnimationKind::Angel,
        AnimationKind::CrossingBlobs,
        AnimationKind::Clock,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AnimationKind::Clock => "clock",
            AnimationKind::Spiral => "spiral",
            AnimationKind::Star => "star",
            AnimationKind::CrossingBlobs => "crossing-blobs",
            AnimationKind::Pudding => "pudding",
            AnimationKind::Angel => "angel",
        }
    }

    /// Whether this animation shows a fixed picture instead of spots.
    pub fn is_picture(self) -> bool {
        matches!(self, AnimationKind::Pudding | AnimationKind::Angel)
    }
}

impl fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnimationKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnimationKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ConfigurationError::UnknownAnimation(s.to_string()))
    }
}
