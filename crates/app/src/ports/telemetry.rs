//! Telemetry port: best-effort forwarding of poll batches.

use std::future::Future;

use growlink_domain::error::GrowlinkError;
use growlink_domain::reading::Reading;

/// Publishes the readings of one poll cycle to a remote sink.
///
/// Implementations interpret each [`RawValue`](growlink_domain::reading::RawValue)
/// (boolean for `0`/`1`, numeric otherwise) and own their retry and flush
/// policy. Delivery is at most once; a failed batch is not replayed.
pub trait TelemetrySink: Send + Sync {
    /// Publish one batch.
    ///
    /// # Errors
    ///
    /// Returns [`GrowlinkError::Publish`] when the sink rejects the batch.
    /// Callers log it and move on.
    fn publish(
        &self,
        readings: &[Reading],
    ) -> impl Future<Output = Result<(), GrowlinkError>> + Send;
}

impl<T: TelemetrySink> TelemetrySink for std::sync::Arc<T> {
    fn publish(
        &self,
        readings: &[Reading],
    ) -> impl Future<Output = Result<(), GrowlinkError>> + Send {
        (**self).publish(readings)
    }
}
