//! Line protocol spoken with the microcontroller.
//!
//! Every frame is a newline-terminated ASCII line.
//!
//! | Direction | Frame | Meaning |
//! |-----------|-------|---------|
//! | host → board | `get` | report every device |
//! | board → host | `<name>:<value>` | one reading, repeated, ended by silence or a blank line |
//! | host → board | `set:<name>:<0\|1>` | switch an actuator, no reply expected |

use crate::error::FrameError;
use crate::id::DeviceId;
use crate::reading::{RawValue, Reading};

/// Status query sent by the poller.
pub const QUERY: &str = "get";

/// Prefix of an actuator command.
pub const SET_PREFIX: &str = "set";

/// Separator between frame fields.
pub const SEPARATOR: char = ':';

/// Split a response line into a [`Reading`] on the first `:`.
///
/// Surrounding whitespace (including `\r`) is ignored. The value keeps any
/// further `:` characters.
///
/// # Errors
///
/// Returns a [`FrameError`] when the separator is missing or the name is empty.
pub fn parse_line(line: &str) -> Result<Reading, FrameError> {
    let line = line.trim();
    let (name, value) = line
        .split_once(SEPARATOR)
        .ok_or_else(|| FrameError::MissingSeparator {
            line: line.to_string(),
        })?;
    if name.is_empty() {
        return Err(FrameError::EmptyName {
            line: line.to_string(),
        });
    }
    Ok(Reading::new(DeviceId::from_wire(name), RawValue::new(value)))
}

/// Parsed response batch: well-formed readings plus the rejected lines.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Batch {
    pub readings: Vec<Reading>,
    pub rejected: Vec<FrameError>,
}

/// Parse every line of a response, keeping arrival order.
///
/// A malformed line never aborts the batch.
pub fn parse_batch<I, S>(lines: I) -> Batch
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut batch = Batch::default();
    for line in lines {
        match parse_line(line.as_ref()) {
            Ok(reading) => batch.readings.push(reading),
            Err(err) => batch.rejected.push(err),
        }
    }
    batch
}
