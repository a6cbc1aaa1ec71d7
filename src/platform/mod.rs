//! Platform abstraction layer
//!
//! This module provides the hardware abstraction the timekeeping core runs
//! on: a free-running counter, a tick service and a GPIO event peripheral.
//! All peripheral access is isolated to implementations of these traits.

pub mod error;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{GpioError, PlatformError, Result, RtcError, TimerError};
pub use traits::{CounterInterface, GpioInterface, Platform, TickServiceInterface};
