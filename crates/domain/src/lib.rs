//! # growlink-domain
//!
//! Pure domain model for the growlink garden controller.
//!
//! ## Responsibilities
//! - Foundational types: device identifiers, error conventions, time of day
//! - Define **Readings** (`name:value` observations) and their telemetry interpretation
//! - Define **Time windows** with midnight wraparound
//! - Define the **line protocol** (`get`, `name:value`, `set:name:state`)
//! - Decide whether a scheduled actuator must be switched
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod command;
pub mod device;
pub mod protocol;
pub mod reading;
pub mod schedule;
pub mod window;
