//! # growlink-adapter-mqtt
//!
//! MQTT adapter: forwards each poll batch to a broker as the
//! [`TelemetrySink`](growlink_app::ports::TelemetrySink) port.
//!
//! ## Topics and payloads
//!
//! Every reading the board reports is published on `<base_topic>/<device>`
//! with QoS 0 and a JSON body:
//!
//! ```json
//! { "value": 21.5, "raw": "21.5" }
//! ```
//!
//! Switch states (`0`/`1`) become JSON booleans. Readings that are neither
//! switches nor finite numbers are skipped with a warning.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `growlink-app` and `growlink-domain`.

mod config;
mod error;
mod sink;

pub use config::MqttConfig;
pub use error::MqttError;
pub use sink::MqttTelemetry;
