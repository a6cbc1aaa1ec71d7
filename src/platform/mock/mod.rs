//! Mock platform implementation for testing
//!
//! This module provides mock implementations of platform traits that can be used
//! for unit testing without requiring actual hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```
//! use node_timekeeper::platform::mock::MockCounter;
//! use node_timekeeper::platform::traits::{CounterEvent, CounterInterface};
//!
//! let mut counter = MockCounter::new();
//! counter.init(4095).unwrap();
//! counter.trigger_overflow();
//!
//! let mut overflows = 0;
//! counter.advance(16, |event| {
//!     if event == CounterEvent::Overflow {
//!         overflows += 1;
//!     }
//! });
//! assert_eq!(overflows, 1);
//! ```

#![cfg(any(test, feature = "mock"))]

mod counter;
mod gpio;
mod platform;
mod tick;

pub use counter::MockCounter;
pub use gpio::{MockGpio, MockPinConfig};
pub use platform::MockPlatform;
pub use tick::{MockTickService, DEFAULT_POOL_SIZE};
