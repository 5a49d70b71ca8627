//! Serial link configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the serial link to the microcontroller.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Candidate device paths, tried in order until one opens.
    pub ports: Vec<String>,
    /// Line speed.
    pub baud_rate: u32,
    /// Pause after opening the port, letting the board finish its reset, in milliseconds.
    pub startup_delay_ms: u64,
    /// Delay between writing a command and reading its response, in milliseconds.
    pub settle_ms: u64,
    /// Pause before each line read, in milliseconds.
    pub read_poll_ms: u64,
    /// How long a single line read waits for data before the batch is considered over, in milliseconds.
    pub read_timeout_ms: u64,
    /// Upper bound on draining one response batch, in milliseconds.
    pub batch_timeout_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            ports: vec!["/dev/ttyACM0".to_string(), "/dev/ttyS0".to_string()],
            baud_rate: 9600,
            startup_delay_ms: 500,
            settle_ms: 1000,
            read_poll_ms: 100,
            read_timeout_ms: 1000,
            batch_timeout_ms: 5000,
        }
    }
}

impl SerialConfig {
    /// Transaction timing derived from this configuration.
    #[must_use]
    pub fn timing(&self) -> LinkTiming {
        LinkTiming {
            settle: Duration::from_millis(self.settle_ms),
            read_poll: Duration::from_millis(self.read_poll_ms),
            read_timeout: Duration::from_millis(self.read_timeout_ms),
            batch_timeout: Duration::from_millis(self.batch_timeout_ms),
        }
    }

    #[must_use]
    pub fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms)
    }
}

/// Delays and bounds applied to each link transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkTiming {
    pub settle: Duration,
    pub read_poll: Duration,
    pub read_timeout: Duration,
    pub batch_timeout: Duration,
}

impl Default for LinkTiming {
    fn default() -> Self {
        SerialConfig::default().timing()
    }
}
