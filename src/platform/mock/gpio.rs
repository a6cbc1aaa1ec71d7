//! Mock GPIO implementation for testing

use crate::platform::{
    error::{GpioError, PlatformError},
    traits::{GpioInterface, Polarity, Pull, MAX_PINS},
    Result,
};

/// Peripheral-side view of one mock pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockPinConfig {
    /// Pin not claimed
    Unused,
    /// Sensed input
    Input {
        sense: Polarity,
        pull: Pull,
        event_enabled: bool,
    },
    /// Push-pull output
    Output,
}

/// Mock GPIO implementation
///
/// Tracks pin configuration and levels, and counts every peripheral
/// access so tests can assert that guarded operations never reached the
/// hardware.
#[derive(Debug)]
pub struct MockGpio {
    pins: [MockPinConfig; MAX_PINS],
    levels: u32,
    accesses: u32,
    reject_configuration: bool,
}

impl MockGpio {
    /// Create a new mock GPIO with every pin unused and low
    pub fn new() -> Self {
        Self {
            pins: [MockPinConfig::Unused; MAX_PINS],
            levels: 0,
            accesses: 0,
            reject_configuration: false,
        }
    }

    /// Make subsequent `configure_*` calls fail with a hardware error
    pub fn reject_configuration(&mut self, reject: bool) {
        self.reject_configuration = reject;
    }

    /// Configuration of `pin` (`Unused` when out of range)
    pub fn pin_config(&self, pin: u8) -> MockPinConfig {
        self.pins
            .get(pin as usize)
            .copied()
            .unwrap_or(MockPinConfig::Unused)
    }

    /// Current level of `pin`
    pub fn level(&self, pin: u8) -> bool {
        (pin as usize) < MAX_PINS && self.levels & (1 << pin) != 0
    }

    /// Number of peripheral calls made so far
    pub fn access_count(&self) -> u32 {
        self.accesses
    }

    /// Drive an external level onto `pin`
    ///
    /// Returns the edge polarity when the change would raise a pin event:
    /// the pin is an input with its event enabled and the edge matches the
    /// sense setting.
    pub fn inject_level(&mut self, pin: u8, high: bool) -> Option<Polarity> {
        let MockPinConfig::Input {
            sense,
            event_enabled,
            ..
        } = self.pin_config(pin)
        else {
            return None;
        };

        let was_high = self.level(pin);
        self.write_level(pin, high);

        let edge = match (was_high, high) {
            (false, true) => Polarity::LowToHigh,
            (true, false) => Polarity::HighToLow,
            _ => return None,
        };

        (event_enabled && sense.matches(edge)).then_some(edge)
    }

    fn write_level(&mut self, pin: u8, high: bool) {
        if high {
            self.levels |= 1 << pin;
        } else {
            self.levels &= !(1 << pin);
        }
    }

    fn claim(&mut self, pin: u8, config: MockPinConfig) -> Result<()> {
        self.accesses += 1;
        let slot = self
            .pins
            .get_mut(pin as usize)
            .ok_or(PlatformError::Gpio(GpioError::InvalidPin))?;
        if *slot != MockPinConfig::Unused {
            return Err(PlatformError::Gpio(GpioError::PinInUse));
        }
        if self.reject_configuration {
            return Err(PlatformError::Gpio(GpioError::HardwareError));
        }
        *slot = config;
        Ok(())
    }

    fn release(&mut self, pin: u8) {
        self.accesses += 1;
        if let Some(slot) = self.pins.get_mut(pin as usize) {
            *slot = MockPinConfig::Unused;
        }
    }

    fn set_event(&mut self, pin: u8, enabled: bool) {
        self.accesses += 1;
        if let Some(MockPinConfig::Input { event_enabled, .. }) = self.pins.get_mut(pin as usize)
        {
            *event_enabled = enabled;
        }
    }

    fn drive(&mut self, pin: u8, high: impl FnOnce(bool) -> bool) {
        self.accesses += 1;
        if self.pin_config(pin) == MockPinConfig::Output {
            let level = high(self.level(pin));
            self.write_level(pin, level);
        }
    }
}

impl Default for MockGpio {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioInterface for MockGpio {
    fn configure_input(&mut self, pin: u8, sense: Polarity, pull: Pull) -> Result<()> {
        self.claim(
            pin,
            MockPinConfig::Input {
                sense,
                pull,
                event_enabled: false,
            },
        )?;
        // Pulls settle the idle level
        match pull {
            Pull::Up => self.write_level(pin, true),
            Pull::Down => self.write_level(pin, false),
            Pull::None => {}
        }
        Ok(())
    }

    fn release_input(&mut self, pin: u8) {
        self.release(pin);
    }

    fn enable_event(&mut self, pin: u8, _enable_irq: bool) {
        self.set_event(pin, true);
    }

    fn disable_event(&mut self, pin: u8) {
        self.set_event(pin, false);
    }

    fn is_high(&self, pin: u8) -> bool {
        self.level(pin)
    }

    fn configure_output(&mut self, pin: u8, initial_high: bool) -> Result<()> {
        self.claim(pin, MockPinConfig::Output)?;
        self.write_level(pin, initial_high);
        Ok(())
    }

    fn release_output(&mut self, pin: u8) {
        self.release(pin);
    }

    fn set_high(&mut self, pin: u8) {
        self.drive(pin, |_| true);
    }

    fn set_low(&mut self, pin: u8) {
        self.drive(pin, |_| false);
    }

    fn toggle(&mut self, pin: u8) {
        self.drive(pin, |level| !level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_gpio_output() {
        let mut gpio = MockGpio::new();
        gpio.configure_output(17, true).unwrap();
        assert!(gpio.is_high(17));

        gpio.set_low(17);
        assert!(!gpio.is_high(17));
        gpio.toggle(17);
        assert!(gpio.is_high(17));
    }

    #[test]
    fn test_mock_gpio_pin_in_use() {
        let mut gpio = MockGpio::new();
        gpio.configure_input(3, Polarity::Toggle, Pull::Up).unwrap();
        assert_eq!(
            gpio.configure_output(3, false),
            Err(PlatformError::Gpio(GpioError::PinInUse))
        );

        gpio.release_input(3);
        assert!(gpio.configure_output(3, false).is_ok());
    }

    #[test]
    fn test_mock_gpio_invalid_pin() {
        let mut gpio = MockGpio::new();
        assert_eq!(
            gpio.configure_input(32, Polarity::Toggle, Pull::None),
            Err(PlatformError::Gpio(GpioError::InvalidPin))
        );
    }

    #[test]
    fn test_mock_gpio_inject_level_reports_matching_edges() {
        let mut gpio = MockGpio::new();
        gpio.configure_input(5, Polarity::HighToLow, Pull::Up).unwrap();

        // Event not enabled yet
        assert_eq!(gpio.inject_level(5, false), None);
        gpio.inject_level(5, true);

        gpio.enable_event(5, true);
        assert_eq!(gpio.inject_level(5, false), Some(Polarity::HighToLow));
        assert_eq!(gpio.inject_level(5, true), None);
        // No edge without a level change
        assert_eq!(gpio.inject_level(5, true), None);

        gpio.disable_event(5);
        assert_eq!(gpio.inject_level(5, false), None);
    }

    #[test]
    fn test_mock_gpio_rejected_configuration() {
        let mut gpio = MockGpio::new();
        gpio.reject_configuration(true);
        assert_eq!(
            gpio.configure_input(1, Polarity::Toggle, Pull::None),
            Err(PlatformError::Gpio(GpioError::HardwareError))
        );
        assert_eq!(gpio.pin_config(1), MockPinConfig::Unused);
    }

    #[test]
    fn test_mock_gpio_counts_accesses() {
        let mut gpio = MockGpio::new();
        assert_eq!(gpio.access_count(), 0);
        gpio.configure_output(2, false).unwrap();
        gpio.set_high(2);
        assert_eq!(gpio.access_count(), 2);
    }
}
