//! # growlink-adapter-serial
//!
//! Serial adapter: talks to the garden controller board over a half-duplex
//! serial line and exposes it as the [`Link`](growlink_app::ports::Link) port.
//!
//! ## How it works
//!
//! The board understands newline-terminated ASCII commands. The host asks
//! once (`get`) and drains replies until silence, so every transaction is:
//!
//! 1. take the link mutex (held until step 5)
//! 2. drop any unsolicited bytes still buffered
//! 3. write the command and `\n`
//! 4. wait the settle delay
//! 5. read one line at a time until a blank line, a silent read, or the batch timeout
//!
//! End of stream or an I/O error marks the shared
//! [`Liveness`](growlink_app::Liveness) as down; the link then refuses
//! further transactions.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `growlink-app` and `growlink-domain`.

mod config;
mod error;
mod link;
mod open;

pub use config::{LinkTiming, SerialConfig};
pub use error::SerialError;
pub use link::SerialLink;
pub use open::{open, open_first};
