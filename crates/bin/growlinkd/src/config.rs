//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `growlink.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use growlink_adapter_mqtt::MqttConfig;
use growlink_adapter_serial::SerialConfig;
use growlink_domain::device;
use growlink_domain::id::DeviceId;
use growlink_domain::schedule::Schedule;
use growlink_domain::time::{TimeOfDay, hhmm};
use growlink_domain::window::TimeWindow;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Serial link settings.
    pub serial: SerialConfig,
    /// Loop intervals and the scheduled actuator.
    pub schedule: ScheduleConfig,
    /// Telemetry sink selection.
    pub telemetry: TelemetryConfig,
    /// MQTT broker settings, used when `telemetry.mqtt_enabled` is set.
    pub mqtt: MqttConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Poll/analyze cadence and the actuator's time window.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Seconds between two status queries.
    pub poll_interval_secs: u64,
    /// Seconds between two schedule evaluations.
    pub analyze_interval_secs: u64,
    /// Device switched by the schedule.
    pub actuator: DeviceId,
    /// Window start, `HH:MM` or `HH:MM:SS`.
    #[serde(with = "hhmm")]
    pub start: TimeOfDay,
    /// Window stop, `HH:MM` or `HH:MM:SS`. Earlier than `start` wraps midnight.
    #[serde(with = "hhmm")]
    pub stop: TimeOfDay,
}

/// Telemetry sink selection.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Publish readings to MQTT instead of the log.
    pub mqtt_enabled: bool,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `growlink.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("growlink.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = var("GROWLINK_SERIAL_PORTS") {
            self.serial.ports = val
                .split(',')
                .map(str::trim)
                .filter(|port| !port.is_empty())
                .map(ToString::to_string)
                .collect();
        }
        if let Some(val) = var("GROWLINK_ACTUATOR") {
            self.schedule.actuator = DeviceId::new(val).map_err(|err| {
                ConfigError::Validation(format!("GROWLINK_ACTUATOR: {err}"))
            })?;
        }
        if let Some(val) = var("GROWLINK_WINDOW") {
            let window: TimeWindow = val.parse().map_err(|err| {
                ConfigError::Validation(format!("GROWLINK_WINDOW: {err}"))
            })?;
            self.schedule.start = window.start;
            self.schedule.stop = window.stop;
        }
        if let Some(val) = var("GROWLINK_MQTT_HOST") {
            self.mqtt.broker_host = val;
            self.telemetry.mqtt_enabled = true;
        }
        if let Some(val) = var("GROWLINK_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.serial.ports.is_empty() {
            return Err(ConfigError::Validation(
                "at least one serial port must be configured".to_string(),
            ));
        }
        if self.serial.baud_rate == 0 {
            return Err(ConfigError::Validation("baud_rate must be non-zero".to_string()));
        }
        if self.serial.read_timeout_ms == 0 || self.serial.batch_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "read and batch timeouts must be non-zero".to_string(),
            ));
        }
        if self.schedule.poll_interval_secs == 0 || self.schedule.analyze_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "poll and analyze intervals must be non-zero".to_string(),
            ));
        }
        if self.telemetry.mqtt_enabled {
            if self.mqtt.broker_host.is_empty() || self.mqtt.client_id.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "mqtt broker_host and client_id must be set".to_string(),
                ));
            }
            if self.mqtt.base_topic.contains(['+', '#']) {
                return Err(ConfigError::Validation(
                    "mqtt base_topic must not contain wildcards".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl ScheduleConfig {
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    #[must_use]
    pub fn analyze_interval(&self) -> Duration {
        Duration::from_secs(self.analyze_interval_secs)
    }

    /// Build the domain schedule.
    #[must_use]
    pub fn schedule(&self) -> Schedule {
        Schedule::new(
            self.actuator.clone(),
            TimeWindow::new(self.start, self.stop),
        )
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 10,
            analyze_interval_secs: 30,
            actuator: device::water_pump(),
            start: TimeOfDay::from_hms_opt(5, 0, 0).unwrap_or_default(),
            stop: TimeOfDay::from_hms_opt(23, 0, 0).unwrap_or_default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "growlinkd=info,growlink=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
