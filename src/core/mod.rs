//! Core infrastructure
//!
//! Logging and the small trait layer (shared state, notification,
//! timestamps) that the subsystems are built on.

pub mod log_buffer;
pub mod logging;
pub mod traits;
