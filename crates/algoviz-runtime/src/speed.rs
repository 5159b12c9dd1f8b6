#![forbid(unsafe_code)]

//! Playback speeds and their step intervals.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// User-facing speed setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    Slow,
    #[default]
    Normal,
    Fast,
    /// No delay: playback jumps straight to the final step.
    Instant,
}

impl Speed {
    pub const ALL: [Self; 4] = [Self::Slow, Self::Normal, Self::Fast, Self::Instant];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Normal => "normal",
            Self::Fast => "fast",
            Self::Instant => "instant",
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown speed name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown speed: {0} (expected slow, normal, fast or instant)")]
pub struct ParseSpeedError(String);

impl FromStr for Speed {
    type Err = ParseSpeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|speed| speed.name() == lowered)
            .ok_or_else(|| ParseSpeedError(s.to_string()))
    }
}

/// Step interval for each non-instant speed, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedTable {
    pub slow_ms: u64,
    pub normal_ms: u64,
    pub fast_ms: u64,
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self {
            slow_ms: 1000,
            normal_ms: 500,
            fast_ms: 100,
        }
    }
}

impl SpeedTable {
    /// Interval between automatic steps; zero for [`Speed::Instant`].
    #[must_use]
    pub fn delay(&self, speed: Speed) -> Duration {
        match speed {
            Speed::Slow => Duration::from_millis(self.slow_ms),
            Speed::Normal => Duration::from_millis(self.normal_ms),
            Speed::Fast => Duration::from_millis(self.fast_ms),
            Speed::Instant => Duration::ZERO,
        }
    }
}
