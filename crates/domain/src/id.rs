//! Device identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Name of a sensor or actuator attached to the microcontroller.
///
/// Identifiers are opaque strings fixed by the firmware (e.g. `"RelaySwitch3"`,
/// `"DHT22Sensor0temp"`) and stay stable for the process lifetime. Because
/// they travel verbatim inside `name:value` and `set:name:state` frames, an
/// identifier built from configuration must not contain `:`, whitespace or
/// control characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceId(String);

impl DeviceId {
    /// Build a validated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyDeviceId`] for an empty string and
    /// [`ValidationError::InvalidDeviceId`] when a forbidden character is found.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::EmptyDeviceId);
        }
        if let Some(found) = id
            .chars()
            .find(|c| *c == ':' || c.is_whitespace() || c.is_control())
        {
            return Err(ValidationError::InvalidDeviceId { id, found });
        }
        Ok(Self(id))
    }

    /// Wrap a name as reported by the board. The caller guarantees it is non-empty.
    pub(crate) fn from_wire(name: &str) -> Self {
        Self(name.to_string())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DeviceId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for DeviceId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DeviceId> for String {
    fn from(id: DeviceId) -> Self {
        id.0
    }
}

impl AsRef<str> for DeviceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
