//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod counter;
pub mod gpio;
pub mod platform;
pub mod tick;

// Re-export trait interfaces
pub use counter::{CounterEvent, CounterInterface};
pub use gpio::{GpioInterface, Polarity, Pull, MAX_PINS};
pub use platform::Platform;
pub use tick::{SlotId, TickServiceInterface};
