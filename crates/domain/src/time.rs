//! Time-of-day helpers.

use chrono::{Local, NaiveTime};

use crate::error::ValidationError;

/// Wall-clock time with no date component.
pub type TimeOfDay = NaiveTime;

/// Return the current local time of day.
#[must_use]
pub fn local_time_of_day() -> TimeOfDay {
    Local::now().time()
}

/// Parse `HH:MM` or `HH:MM:SS` (24-hour clock).
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTimeOfDay`] for any other shape.
pub fn parse_time_of_day(s: &str) -> Result<TimeOfDay, ValidationError> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| ValidationError::InvalidTimeOfDay(s.to_string()))
}

/// Serde adapter reading a [`TimeOfDay`] from `HH:MM` or `HH:MM:SS`.
pub mod hhmm {
    use serde::{Deserialize, Deserializer};

    use super::TimeOfDay;

    /// # Errors
    ///
    /// Fails when the string is not a valid time of day.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeOfDay, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time_of_day(&raw).map_err(serde::de::Error::custom)
    }
}
