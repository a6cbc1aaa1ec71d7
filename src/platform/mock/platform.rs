//! Mock Platform implementation for testing

use crate::platform::{traits::Platform, Result};

use super::{MockCounter, MockGpio, MockTickService};

/// Mock Platform implementation
///
/// Bundles a 24-bit [`MockCounter`], a [`MockTickService`] and a
/// [`MockGpio`] for hardware-free testing.
///
/// # Example
///
/// ```
/// use node_timekeeper::platform::mock::MockPlatform;
/// use node_timekeeper::platform::traits::{CounterInterface, Platform};
///
/// let platform = MockPlatform::init().unwrap();
/// let (counter, _ticks, _gpio) = platform.split();
/// assert_eq!(counter.max_ticks(), 0x00FF_FFFF);
/// ```
#[derive(Debug)]
pub struct MockPlatform<'a> {
    counter: MockCounter,
    tick_service: MockTickService<'a>,
    gpio: MockGpio,
}

impl<'a> MockPlatform<'a> {
    /// Create a new mock platform
    pub fn new() -> Self {
        Self {
            counter: MockCounter::new(),
            tick_service: MockTickService::new(),
            gpio: MockGpio::new(),
        }
    }

    /// Replace the counter (e.g. with [`MockCounter::failing`])
    pub fn with_counter(mut self, counter: MockCounter) -> Self {
        self.counter = counter;
        self
    }

    /// Replace the GPIO peripheral
    pub fn with_gpio(mut self, gpio: MockGpio) -> Self {
        self.gpio = gpio;
        self
    }
}

impl<'a> Default for MockPlatform<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Platform<'a> for MockPlatform<'a> {
    type Counter = MockCounter;
    type TickService = MockTickService<'a>;
    type Gpio = MockGpio;

    fn init() -> Result<Self> {
        Ok(Self::new())
    }

    fn split(self) -> (Self::Counter, Self::TickService, Self::Gpio) {
        (self.counter, self.tick_service, self.gpio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::traits::{CounterInterface, TickServiceInterface};

    #[test]
    fn test_mock_platform_split() {
        let platform = MockPlatform::init().unwrap();
        let (counter, ticks, gpio) = platform.split();

        assert_eq!(counter.max_ticks(), 0x00FF_FFFF);
        assert_eq!(ticks.tick_hz(), 32_768);
        assert_eq!(gpio.access_count(), 0);
    }

    #[test]
    fn test_mock_platform_with_counter() {
        let platform = MockPlatform::new().with_counter(MockCounter::with_width(16));
        let (counter, _, _) = platform.split();
        assert_eq!(counter.max_ticks(), 0xFFFF);
    }
}
