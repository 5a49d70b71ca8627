//! Raw device readings and their telemetry interpretation.

use std::fmt;

use serde::Serialize;

use crate::id::DeviceId;

/// Value exactly as received from the wire.
///
/// Stored untouched in the state cache. By convention `"0"` and `"1"` are
/// boolean devices (relays, float switches) and anything else that parses as
/// a number is a sensor reading; see [`RawValue::interpret`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawValue(String);

impl RawValue {
    /// Wrap a raw string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Boolean reading of a switch-like device, `None` for anything but `"0"`/`"1"`.
    #[must_use]
    pub fn as_switch(&self) -> Option<bool> {
        match self.0.as_str() {
            "0" => Some(false),
            "1" => Some(true),
            _ => None,
        }
    }

    /// Interpret the value for telemetry.
    ///
    /// Returns `None` when the value is neither a switch state nor a finite number.
    #[must_use]
    pub fn interpret(&self) -> Option<TelemetryValue> {
        if let Some(on) = self.as_switch() {
            return Some(TelemetryValue::Bool(on));
        }
        self.0
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(TelemetryValue::Number)
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Typed value forwarded to a telemetry sink.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TelemetryValue {
    Bool(bool),
    Number(f64),
}

impl fmt::Display for TelemetryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => b.fmt(f),
            Self::Number(n) => n.fmt(f),
        }
    }
}

/// One `name:value` observation from a poll batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub device: DeviceId,
    pub value: RawValue,
}

impl Reading {
    #[must_use]
    pub fn new(device: DeviceId, value: RawValue) -> Self {
        Self { device, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_interpret_zero_and_one_as_booleans() {
        assert_eq!(RawValue::from("0").interpret(), Some(TelemetryValue::Bool(false)));
        assert_eq!(RawValue::from("1").interpret(), Some(TelemetryValue::Bool(true)));
    }

    #[test]
    fn should_interpret_other_numbers_as_numeric() {
        assert_eq!(RawValue::from("2").interpret(), Some(TelemetryValue::Number(2.0)));
        assert_eq!(
            RawValue::from("23.5").interpret(),
            Some(TelemetryValue::Number(23.5))
        );
        assert_eq!(
            RawValue::from("-4").interpret(),
            Some(TelemetryValue::Number(-4.0))
        );
    }

    #[test]
    fn should_not_interpret_text_or_non_finite_values() {
        assert_eq!(RawValue::from("nan").interpret(), None);
        assert_eq!(RawValue::from("inf").interpret(), None);
        assert_eq!(RawValue::from("error").interpret(), None);
        assert_eq!(RawValue::from("").interpret(), None);
    }

    #[test]
    fn should_only_read_switch_state_from_zero_or_one() {
        assert_eq!(RawValue::from("1").as_switch(), Some(true));
        assert_eq!(RawValue::from("0").as_switch(), Some(false));
        assert_eq!(RawValue::from("1.0").as_switch(), None);
    }

    #[test]
    fn should_serialize_telemetry_values_untagged() {
        let json = serde_json::to_string(&[TelemetryValue::Bool(true), TelemetryValue::Number(21.5)])
            .unwrap();
        assert_eq!(json, "[true,21.5]");
    }
}
