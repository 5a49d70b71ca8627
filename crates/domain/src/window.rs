//! Daily activation window.

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::time::{self, TimeOfDay};

/// A start/stop pair of times of day during which an actuator should be on.
///
/// When `start <= stop` the window is the closed interval `[start, stop]`.
/// When `start > stop` it wraps across midnight and covers
/// `[start, 24:00) ∪ [00:00, stop]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: TimeOfDay,
    pub stop: TimeOfDay,
}

impl TimeWindow {
    #[must_use]
    pub fn new(start: TimeOfDay, stop: TimeOfDay) -> Self {
        Self { start, stop }
    }

    /// Whether the window crosses midnight.
    #[must_use]
    pub fn wraps_midnight(&self) -> bool {
        self.start > self.stop
    }

    /// Whether `t` falls inside the window. Both bounds are inclusive.
    #[must_use]
    pub fn contains(&self, t: TimeOfDay) -> bool {
        if self.wraps_midnight() {
            t >= self.start || t <= self.stop
        } else {
            self.start <= t && t <= self.stop
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%H:%M:%S"),
            self.stop.format("%H:%M:%S")
        )
    }
}

/// Parses `HH:MM-HH:MM` (seconds optional on either side).
impl FromStr for TimeWindow {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, stop) = s
            .split_once('-')
            .ok_or_else(|| ValidationError::InvalidTimeWindow(s.to_string()))?;
        Ok(Self::new(
            time::parse_time_of_day(start)?,
            time::parse_time_of_day(stop)?,
        ))
    }
}
