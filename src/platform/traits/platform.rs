//! Root platform trait
//!
//! This module defines the root Platform trait that aggregates the
//! peripherals the timekeeping core runs on.

use super::{CounterInterface, GpioInterface, TickServiceInterface};
use crate::platform::Result;

/// Root platform trait
///
/// Platform implementations provide concrete types for each peripheral
/// via associated types, enabling zero-cost abstractions through
/// compile-time dispatch.
///
/// # Example
///
/// ```ignore
/// pub struct Nrf52Platform {
///     rtc2: Nrf52Rtc,
///     app_timer: AppTimer,
///     gpiote: Nrf52Gpiote,
/// }
///
/// impl<'a> Platform<'a> for Nrf52Platform {
///     type Counter = Nrf52Rtc;
///     type TickService = AppTimer;
///     type Gpio = Nrf52Gpiote;
///
///     fn init() -> Result<Self> {
///         // Start LFCLK, claim RTC2 and GPIOTE
///     }
///
///     fn split(self) -> (Self::Counter, Self::TickService, Self::Gpio) {
///         (self.rtc2, self.app_timer, self.gpiote)
///     }
/// }
/// ```
pub trait Platform<'a>: Sized {
    /// Real-time counter peripheral type
    type Counter: CounterInterface;

    /// Tick service (software timer slot pool) type
    type TickService: TickServiceInterface<'a>;

    /// GPIO / edge-event peripheral type
    type Gpio: GpioInterface;

    /// Initialize the platform
    ///
    /// This method performs platform-specific initialization including
    /// low-frequency clock start and peripheral claiming.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InitializationFailed` if initialization fails.
    fn init() -> Result<Self>;

    /// Hand the peripherals over to their drivers
    fn split(self) -> (Self::Counter, Self::TickService, Self::Gpio);
}
