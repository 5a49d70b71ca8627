//! MQTT telemetry configuration.

use serde::Deserialize;

/// Configuration for the MQTT telemetry sink.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    /// MQTT broker hostname or IP address.
    pub broker_host: String,
    /// MQTT broker port.
    pub broker_port: u16,
    /// MQTT client identifier.
    pub client_id: String,
    /// Topic prefix; each device publishes to `<base_topic>/<device>`.
    pub base_topic: String,
    /// Keep-alive interval in seconds.
    pub keep_alive_secs: u16,
    /// Outgoing messages buffered while the broker is unreachable.
    pub queue_capacity: usize,
    /// Delay before reconnecting after a connection error, in seconds.
    pub reconnect_delay_secs: u16,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            broker_host: "localhost".to_string(),
            broker_port: 1883,
            client_id: "growlink".to_string(),
            base_topic: "growlink".to_string(),
            keep_alive_secs: 30,
            queue_capacity: 64,
            reconnect_delay_secs: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let config = MqttConfig::default();
        assert_eq!(config.broker_host, "localhost");
        assert_eq!(config.broker_port, 1883);
        assert_eq!(config.client_id, "growlink");
        assert_eq!(config.base_topic, "growlink");
        assert_eq!(config.keep_alive_secs, 30);
        assert_eq!(config.queue_capacity, 64);
    }

    #[test]
    fn should_deserialize_from_toml() {
        let toml = r#"
            broker_host = "mqtt.example.com"
            broker_port = 8883
            client_id = "balcony"
            base_topic = "garden/balcony"
            keep_alive_secs = 60
            queue_capacity = 16
            reconnect_delay_secs = 10
        "#;
        let config: MqttConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.broker_host, "mqtt.example.com");
        assert_eq!(config.broker_port, 8883);
        assert_eq!(config.client_id, "balcony");
        assert_eq!(config.base_topic, "garden/balcony");
        assert_eq!(config.keep_alive_secs, 60);
        assert_eq!(config.queue_capacity, 16);
        assert_eq!(config.reconnect_delay_secs, 10);
    }

    #[test]
    fn should_use_defaults_for_missing_fields() {
        let toml = r#"broker_host = "192.168.1.100""#;
        let config: MqttConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.broker_host, "192.168.1.100");
        assert_eq!(config.broker_port, 1883);
        assert_eq!(config.client_id, "growlink");
    }
}
