//! Telemetry sink that writes readings to the log.
//!
//! Used when no remote sink is configured, and handy when bringing up a new
//! board.

use std::future::Future;

use growlink_domain::error::GrowlinkError;
use growlink_domain::reading::Reading;

use crate::ports::TelemetrySink;

/// [`TelemetrySink`] emitting one `tracing` event per interpreted reading.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTelemetry;

impl TelemetrySink for LogTelemetry {
    fn publish(
        &self,
        readings: &[Reading],
    ) -> impl Future<Output = Result<(), GrowlinkError>> + Send {
        for reading in readings {
            match reading.value.interpret() {
                Some(value) => tracing::info!(device = %reading.device, %value, "telemetry"),
                None => tracing::warn!(
                    device = %reading.device,
                    raw = %reading.value,
                    "skipping reading that is neither boolean nor numeric"
                ),
            }
        }
        async { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use growlink_domain::id::DeviceId;
    use growlink_domain::reading::RawValue;

    #[tokio::test]
    async fn should_accept_any_batch() {
        let readings = vec![
            Reading::new(DeviceId::new("FloatSwitch").unwrap(), RawValue::from("1")),
            Reading::new(DeviceId::new("DHT22Sensor0temp").unwrap(), RawValue::from("oops")),
        ];
        assert!(LogTelemetry.publish(&readings).await.is_ok());
    }
}
