//! MQTT adapter error types.

use growlink_domain::error::GrowlinkError;

/// Errors specific to the MQTT adapter.
#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    /// The rumqttc client refused the request (queue full or event loop gone).
    #[error("MQTT client error")]
    Client(#[source] rumqttc::ClientError),

    /// Failed to encode a reading as JSON.
    #[error("failed to encode MQTT payload")]
    Payload(#[source] serde_json::Error),
}

impl From<MqttError> for GrowlinkError {
    fn from(err: MqttError) -> Self {
        Self::Publish(Box::new(err))
    }
}
