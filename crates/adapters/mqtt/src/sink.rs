//! [`TelemetrySink`] backed by an MQTT broker.

use std::future::Future;
use std::time::Duration;

use growlink_app::ports::TelemetrySink;
use growlink_domain::error::GrowlinkError;
use growlink_domain::id::DeviceId;
use growlink_domain::reading::{Reading, TelemetryValue};
use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::config::MqttConfig;
use crate::error::MqttError;

#[derive(Debug, Serialize)]
struct Payload<'a> {
    value: TelemetryValue,
    raw: &'a str,
}

/// Publishes each interpretable reading to `<base_topic>/<device>`.
///
/// Publishing never waits on the broker: messages are queued for the
/// background event loop, and a full queue surfaces as a recoverable
/// [`GrowlinkError::Publish`].
pub struct MqttTelemetry {
    client: AsyncClient,
    base_topic: String,
    event_loop: Option<JoinHandle<()>>,
}

impl MqttTelemetry {
    /// Create the client and spawn its event loop.
    ///
    /// Must be called from within a tokio runtime. The broker does not need
    /// to be reachable yet; the event loop keeps reconnecting.
    #[must_use]
    pub fn connect(config: &MqttConfig) -> Self {
        let mut options = MqttOptions::new(
            config.client_id.as_str(),
            config.broker_host.as_str(),
            config.broker_port,
        );
        options.set_keep_alive(Duration::from_secs(u64::from(config.keep_alive_secs)));
        options.set_clean_session(true);

        let (client, event_loop) = AsyncClient::new(options, config.queue_capacity.max(1));
        let reconnect_delay = Duration::from_secs(u64::from(config.reconnect_delay_secs));
        let handle = tokio::spawn(drive(event_loop, reconnect_delay));

        tracing::info!(
            broker_host = %config.broker_host,
            broker_port = config.broker_port,
            base_topic = %config.base_topic,
            "MQTT telemetry started"
        );

        Self {
            client,
            base_topic: config.base_topic.clone(),
            event_loop: Some(handle),
        }
    }

    #[cfg(test)]
    fn with_client(client: AsyncClient, base_topic: &str) -> Self {
        Self {
            client,
            base_topic: base_topic.to_string(),
            event_loop: None,
        }
    }

    /// Topic a device's readings are published to.
    #[must_use]
    pub fn topic_for(&self, device: &DeviceId) -> String {
        topic(&self.base_topic, device)
    }

    /// Ask the broker for a clean disconnect and stop the event loop.
    ///
    /// Readings published afterwards are rejected or silently dropped.
    pub fn shutdown(&self) {
        if let Err(err) = self.client.try_disconnect() {
            tracing::debug!(%err, "MQTT disconnect request not queued");
        }
        if let Some(handle) = &self.event_loop {
            handle.abort();
        }
        tracing::info!("MQTT telemetry stopped");
    }

    fn publish_one(&self, reading: &Reading) -> Result<(), MqttError> {
        let Some(value) = reading.value.interpret() else {
            tracing::warn!(
                device = %reading.device,
                raw = %reading.value,
                "skipping reading that is neither boolean nor numeric"
            );
            return Ok(());
        };
        let payload = encode(value, reading.value.as_str())?;
        self.client
            .try_publish(self.topic_for(&reading.device), QoS::AtMostOnce, false, payload)
            .map_err(MqttError::Client)
    }
}

impl Drop for MqttTelemetry {
    fn drop(&mut self) {
        if let Some(handle) = &self.event_loop {
            handle.abort();
        }
    }
}

impl TelemetrySink for MqttTelemetry {
    fn publish(
        &self,
        readings: &[Reading],
    ) -> impl Future<Output = Result<(), GrowlinkError>> + Send {
        let mut first_error = None;
        let mut sent = 0_usize;
        for reading in readings {
            match self.publish_one(reading) {
                Ok(()) => sent += 1,
                Err(err) => {
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                }
            }
        }
        tracing::trace!(sent, total = readings.len(), "MQTT batch queued");
        let result = first_error.map_or(Ok(()), |err| Err(GrowlinkError::from(err)));
        async move { result }
    }
}

fn topic(base_topic: &str, device: &DeviceId) -> String {
    let base = base_topic.trim_end_matches('/');
    if base.is_empty() {
        device.to_string()
    } else {
        format!("{base}/{device}")
    }
}

fn encode(value: TelemetryValue, raw: &str) -> Result<Vec<u8>, MqttError> {
    serde_json::to_vec(&Payload { value, raw }).map_err(MqttError::Payload)
}

async fn drive(mut event_loop: EventLoop, reconnect_delay: Duration) {
    loop {
        match event_loop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                tracing::info!("connected to MQTT broker");
            }
            Ok(event) => tracing::trace!(?event, "MQTT event"),
            Err(err) => {
                tracing::warn!(%err, "MQTT connection error, retrying");
                tokio::time::sleep(reconnect_delay).await;
            }
        }
    }
}
