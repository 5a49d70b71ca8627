//! Actuator commands.

use std::fmt;

use crate::id::DeviceId;
use crate::protocol::{SEPARATOR, SET_PREFIX};

/// Request to switch an actuator on or off. Built, sent, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActuatorCommand {
    pub device: DeviceId,
    pub on: bool,
}

impl ActuatorCommand {
    #[must_use]
    pub fn new(device: DeviceId, on: bool) -> Self {
        Self { device, on }
    }

    /// Render the `set:<name>:<0|1>` frame, without line terminator.
    #[must_use]
    pub fn to_frame(&self) -> String {
        format!(
            "{SET_PREFIX}{SEPARATOR}{}{SEPARATOR}{}",
            self.device,
            u8::from(self.on)
        )
    }
}

impl fmt::Display for ActuatorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_frame())
    }
}
