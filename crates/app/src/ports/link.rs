//! Link port: exclusive request/response transactions with the board.

use std::future::Future;

use growlink_domain::error::GrowlinkError;

/// Line-oriented, mutually exclusive access to the microcontroller.
///
/// Implementations hold exclusive access to the channel for the whole
/// transaction: the write of `command`, the settle delay and the drain of
/// every response line. Two concurrent `transact` calls are totally ordered;
/// a response line is never attributed to another caller's command.
pub trait Link: Send + Sync {
    /// Send `command` and collect the non-empty response lines in arrival order.
    ///
    /// Draining stops at a blank line, when no further data arrives, or when
    /// the implementation's overall timeout elapses.
    ///
    /// # Errors
    ///
    /// Returns [`GrowlinkError::LinkUnavailable`] when the channel is closed
    /// or fails. No retry is attempted.
    fn transact(
        &self,
        command: &str,
    ) -> impl Future<Output = Result<Vec<String>, GrowlinkError>> + Send;
}

impl<T: Link> Link for std::sync::Arc<T> {
    fn transact(
        &self,
        command: &str,
    ) -> impl Future<Output = Result<Vec<String>, GrowlinkError>> + Send {
        (**self).transact(command)
    }
}
