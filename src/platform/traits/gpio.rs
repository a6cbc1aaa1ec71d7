//! GPIO interface trait
//!
//! This module defines the pin-level GPIO and edge-event interface that
//! platform implementations must provide (nRF52 GPIOTE on the reference
//! board). All pins share one pin-change interrupt vector; the platform's
//! handler forwards `(pin, polarity)` to `HandlerTable::dispatch`.

use crate::platform::Result;

/// Number of addressable pins on one port
pub const MAX_PINS: usize = 32;

/// Internal pull resistor selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    /// No pull resistor
    #[default]
    None,
    /// Pull-up resistor
    Up,
    /// Pull-down resistor
    Down,
}

/// Edge polarity for input sensing and for delivered events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Rising edge
    LowToHigh,
    /// Falling edge
    HighToLow,
    /// Either edge
    Toggle,
}

impl Polarity {
    /// Whether an edge of polarity `edge` satisfies this sense setting
    pub fn matches(self, edge: Polarity) -> bool {
        self == Polarity::Toggle || self == edge
    }
}

/// GPIO interface trait
///
/// Pins are addressed by index. Configuration calls allocate the pin in
/// the peripheral; the matching `release_*` call frees it.
///
/// # Safety Invariants
///
/// - Pin number must be below [`MAX_PINS`]
/// - Only one owner per configured pin
pub trait GpioInterface {
    /// Configure `pin` as a sensed input with the given pull
    ///
    /// The event stays disabled until [`enable_event`](Self::enable_event).
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio(GpioError::PinInUse)` if the pin is
    /// already configured, or `GpioError::InvalidPin` if out of range.
    fn configure_input(&mut self, pin: u8, sense: Polarity, pull: Pull) -> Result<()>;

    /// Release an input pin (disables its event)
    fn release_input(&mut self, pin: u8);

    /// Enable edge event generation for an input pin
    fn enable_event(&mut self, pin: u8, enable_irq: bool);

    /// Disable edge event generation for an input pin
    fn disable_event(&mut self, pin: u8);

    /// Read the input level
    fn is_high(&self, pin: u8) -> bool;

    /// Configure `pin` as a push-pull output with an initial level
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio(GpioError::PinInUse)` if the pin is
    /// already configured, or `GpioError::InvalidPin` if out of range.
    fn configure_output(&mut self, pin: u8, initial_high: bool) -> Result<()>;

    /// Release an output pin
    fn release_output(&mut self, pin: u8);

    /// Drive an output pin high
    fn set_high(&mut self, pin: u8);

    /// Drive an output pin low
    fn set_low(&mut self, pin: u8);

    /// Invert an output pin
    fn toggle(&mut self, pin: u8);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polarity_matches() {
        assert!(Polarity::Toggle.matches(Polarity::LowToHigh));
        assert!(Polarity::Toggle.matches(Polarity::HighToLow));
        assert!(Polarity::LowToHigh.matches(Polarity::LowToHigh));
        assert!(!Polarity::LowToHigh.matches(Polarity::HighToLow));
        assert!(!Polarity::HighToLow.matches(Polarity::LowToHigh));
    }
}
