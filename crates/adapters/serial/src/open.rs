//! Opening the physical port.

use tokio_serial::{SerialPortBuilderExt, SerialStream};

use crate::config::SerialConfig;
use crate::error::SerialError;

/// Open a single serial port.
///
/// # Errors
///
/// Returns [`SerialError::Open`] when the OS refuses the port.
pub fn open(port: &str, baud_rate: u32) -> Result<SerialStream, SerialError> {
    tokio_serial::new(port, baud_rate)
        .open_native_async()
        .map_err(|source| SerialError::Open {
            port: port.to_string(),
            source,
        })
}

/// Open the first candidate port that works, in configuration order.
///
/// Must be called from within a tokio runtime. Returns the chosen path along
/// with the stream.
///
/// # Errors
///
/// Returns [`SerialError::NoPortAvailable`] when every candidate fails.
pub fn open_first(config: &SerialConfig) -> Result<(String, SerialStream), SerialError> {
    for port in &config.ports {
        match open(port, config.baud_rate) {
            Ok(stream) => {
                tracing::info!(%port, baud_rate = config.baud_rate, "serial port opened");
                return Ok((port.clone(), stream));
            }
            Err(err) => {
                let cause = std::error::Error::source(&err).map(ToString::to_string);
                tracing::warn!(%port, ?cause, "failed to open serial port, trying next candidate");
            }
        }
    }
    Err(SerialError::NoPortAvailable {
        tried: config.ports.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_fail_when_no_candidate_is_configured() {
        let config = SerialConfig {
            ports: Vec::new(),
            ..SerialConfig::default()
        };
        let err = open_first(&config).unwrap_err();
        assert!(matches!(err, SerialError::NoPortAvailable { tried } if tried.is_empty()));
    }

    #[tokio::test]
    async fn should_try_every_candidate_before_giving_up() {
        let config = SerialConfig {
            ports: vec![
                "/nonexistent/growlink-a".to_string(),
                "/nonexistent/growlink-b".to_string(),
            ],
            ..SerialConfig::default()
        };
        match open_first(&config) {
            Err(SerialError::NoPortAvailable { tried }) => {
                assert_eq!(tried, ["/nonexistent/growlink-a", "/nonexistent/growlink-b"]);
            }
            other => panic!("expected NoPortAvailable, got {other:?}"),
        }
    }
}
