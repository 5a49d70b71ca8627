//! Serial adapter error types.

use growlink_domain::error::GrowlinkError;

/// Errors specific to the serial adapter. All of them mean the link is unusable.
#[derive(Debug, thiserror::Error)]
pub enum SerialError {
    /// A candidate port could not be opened.
    #[error("failed to open serial port {port}")]
    Open {
        port: String,
        #[source]
        source: tokio_serial::Error,
    },

    /// None of the candidate ports could be opened.
    #[error("no serial port available (tried {})", .tried.join(", "))]
    NoPortAvailable { tried: Vec<String> },

    /// Reading from or writing to the port failed.
    #[error("serial I/O error")]
    Io(#[from] std::io::Error),

    /// Writing a command did not complete in time.
    #[error("timed out writing to serial port")]
    WriteTimeout,

    /// The port reached end of stream, or was already reported lost.
    #[error("serial port closed")]
    Closed,
}

impl From<SerialError> for GrowlinkError {
    fn from(err: SerialError) -> Self {
        Self::LinkUnavailable(Box::new(err))
    }
}
