//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`GrowlinkError`] via `From`. Only [`GrowlinkError::LinkUnavailable`] is
//! fatal for a periodic loop; every other variant is absorbed with a
//! diagnostic by the caller.

/// Boxed error used for adapter failures crossing a port boundary.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error for the growlink core.
#[derive(Debug, thiserror::Error)]
pub enum GrowlinkError {
    /// A response line did not have the `name:value` shape.
    #[error("malformed frame: {0}")]
    MalformedFrame(#[from] FrameError),

    /// The serial channel is closed or failed; terminal for the owning loop.
    #[error("link unavailable")]
    LinkUnavailable(#[source] BoxError),

    /// The telemetry sink rejected or failed on a batch.
    #[error("telemetry publish failed")]
    Publish(#[source] BoxError),
}

impl GrowlinkError {
    /// Whether this error must end the loop that observed it.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::LinkUnavailable(_))
    }
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A device identifier was empty.
    #[error("device id must not be empty")]
    EmptyDeviceId,

    /// A device identifier contained a character that cannot travel in a frame.
    #[error("device id {id:?} contains forbidden character {found:?}")]
    InvalidDeviceId {
        /// The rejected identifier.
        id: String,
        /// The first offending character.
        found: char,
    },

    /// A time-of-day string could not be parsed.
    #[error("invalid time of day {0:?}, expected HH:MM or HH:MM:SS")]
    InvalidTimeOfDay(String),

    /// A time window string could not be parsed.
    #[error("invalid time window {0:?}, expected HH:MM-HH:MM")]
    InvalidTimeWindow(String),
}

/// A response line that could not be split into a reading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// The line contains no `:` separator.
    #[error("missing ':' separator in {line:?}")]
    MissingSeparator {
        /// The offending line.
        line: String,
    },

    /// The part before the separator is empty.
    #[error("empty device name in {line:?}")]
    EmptyName {
        /// The offending line.
        line: String,
    },
}
