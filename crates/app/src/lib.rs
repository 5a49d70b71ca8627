//! # growlink-app
//!
//! Application layer: the polling/control engine and its **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `Link`: exclusive request/response transactions with the board
//!   - `TelemetrySink`: best-effort publishing of poll batches
//!   - `Clock`: current time of day
//! - Provide **in-process infrastructure** that doesn't need IO:
//!   - `state_cache`: single-writer / many-reader device state
//!   - `Liveness`: shared "link still usable" flag
//!   - `LogTelemetry`: sink writing readings to the log
//! - Run the two periodic loops:
//!   - `Poller`: query, parse, cache, publish
//!   - `Analyzer`: evaluate the time window, switch the actuator
//!
//! ## Dependency rule
//! Depends on `growlink-domain` only (plus `tokio::sync`/`time` for channels and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod analyzer;
pub mod liveness;
pub mod log_telemetry;
pub mod poller;
pub mod ports;
pub mod state_cache;

pub use analyzer::Analyzer;
pub use liveness::Liveness;
pub use log_telemetry::LogTelemetry;
pub use poller::{PollReport, Poller};
