//! Hardware counter interface trait
//!
//! This module defines the real-time counter interface that platform
//! implementations must provide. The reference hardware is the nRF52 RTC:
//! a 24-bit counter clocked from the 32.768 kHz LFCLK through a 12-bit
//! prescaler, with an overflow event and compare channels.

use crate::platform::Result;

/// Event raised by the counter peripheral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CounterEvent {
    /// Counter wrapped from `max_ticks` to 0
    Overflow,
    /// Counter matched the programmed compare value
    Compare,
}

/// Hardware counter interface trait
///
/// The platform's counter interrupt handler reads and clears the pending
/// event flags and forwards each one to `Rtc::on_event`.
///
/// Register-level accessors take `&self`: they are volatile register
/// writes on hardware and atomics in the mock, and the `Rtc` driver must
/// be reachable from interrupt context through a shared reference.
///
/// # Safety Invariants
///
/// - `read_ticks` is always within `0..=max_ticks()`
/// - Only one owner per counter instance
pub trait CounterInterface {
    /// Program the prescaler, enable the overflow and compare interrupt
    /// sources, and start counting.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InitializationFailed` if the peripheral
    /// cannot be brought up.
    fn init(&mut self, prescaler: u16) -> Result<()>;

    /// Current counter value
    fn read_ticks(&self) -> u32;

    /// Largest value the counter reaches before wrapping (`2^W - 1`)
    fn max_ticks(&self) -> u32;

    /// Program compare channel 0
    ///
    /// The match event fires once; the channel must be programmed again
    /// before it fires another time.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InvalidConfig` if `target` exceeds
    /// `max_ticks()`.
    fn set_compare(&self, target: u32, enable_irq: bool) -> Result<()>;

    /// Disarm compare channel 0 and its interrupt
    fn disable_compare(&self);

    /// Force an overflow soon (test hook)
    ///
    /// Moves the counter to `max_ticks() - 15`, as the nRF52 TRIGOVRFLW
    /// task does, so a genuine overflow follows 16 ticks later.
    fn trigger_overflow(&self);
}
