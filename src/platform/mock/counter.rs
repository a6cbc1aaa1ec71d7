//! Mock real-time counter for testing

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::platform::{
    error::PlatformError,
    traits::{CounterEvent, CounterInterface},
    Result,
};

/// Mock counter implementation
///
/// Simulates a free-running counter of configurable width. Time only
/// moves when a test calls [`advance`](MockCounter::advance), which reports
/// overflow and compare events in the order the hardware would raise them.
#[derive(Debug)]
pub struct MockCounter {
    ticks: AtomicU32,
    max_ticks: u32,
    compare: AtomicU32,
    compare_enabled: AtomicBool,
    running: AtomicBool,
    prescaler: AtomicU32,
    fail_init: bool,
}

impl MockCounter {
    /// Create a 24-bit counter, like the nRF52 RTC
    pub fn new() -> Self {
        Self::with_width(24)
    }

    /// Create a counter `bits` wide (1..=32)
    pub fn with_width(bits: u32) -> Self {
        let max_ticks = if bits >= 32 {
            u32::MAX
        } else {
            (1u32 << bits.max(1)) - 1
        };
        Self {
            ticks: AtomicU32::new(0),
            max_ticks,
            compare: AtomicU32::new(0),
            compare_enabled: AtomicBool::new(false),
            running: AtomicBool::new(false),
            prescaler: AtomicU32::new(0),
            fail_init: false,
        }
    }

    /// Create a counter whose `init` fails
    pub fn failing() -> Self {
        Self {
            fail_init: true,
            ..Self::new()
        }
    }

    /// Set the counter value directly (masked to the counter width)
    pub fn set_ticks(&self, ticks: u32) {
        self.ticks.store(ticks & self.max_ticks, Ordering::SeqCst);
    }

    /// Programmed compare value, if the channel is armed
    pub fn compare_target(&self) -> Option<u32> {
        if self.compare_enabled.load(Ordering::SeqCst) {
            Some(self.compare.load(Ordering::SeqCst))
        } else {
            None
        }
    }

    /// Whether `init` started the counter
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Prescaler programmed by `init`
    pub fn prescaler(&self) -> u16 {
        self.prescaler.load(Ordering::SeqCst) as u16
    }

    /// Advance the counter by `ticks`, reporting each event to `on_event`
    ///
    /// Does nothing until `init` has started the counter. When an overflow
    /// and a compare match land on the same tick, the overflow is reported
    /// first. The callback may reprogram the compare channel.
    pub fn advance(&self, ticks: u32, mut on_event: impl FnMut(CounterEvent)) {
        if !self.is_running() {
            return;
        }

        let period = self.max_ticks as u64 + 1;
        let mut remaining = ticks as u64;

        while remaining > 0 {
            let now = self.ticks.load(Ordering::SeqCst) as u64;
            let to_wrap = period - now;
            let to_compare = self.compare_target().map(|target| {
                let target = target as u64;
                if target > now {
                    target - now
                } else {
                    to_wrap + target
                }
            });

            let step = remaining.min(to_wrap).min(to_compare.unwrap_or(u64::MAX));
            self.ticks
                .store(((now + step) % period) as u32, Ordering::SeqCst);
            remaining -= step;

            if step == to_wrap {
                on_event(CounterEvent::Overflow);
            }
            if to_compare == Some(step) {
                on_event(CounterEvent::Compare);
            }
        }
    }
}

impl Default for MockCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterInterface for MockCounter {
    fn init(&mut self, prescaler: u16) -> Result<()> {
        if self.fail_init {
            return Err(PlatformError::InitializationFailed);
        }
        self.prescaler.store(prescaler as u32, Ordering::SeqCst);
        self.running.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn read_ticks(&self) -> u32 {
        self.ticks.load(Ordering::SeqCst)
    }

    fn max_ticks(&self) -> u32 {
        self.max_ticks
    }

    fn set_compare(&self, target: u32, enable_irq: bool) -> Result<()> {
        if target > self.max_ticks {
            return Err(PlatformError::InvalidConfig);
        }
        self.compare.store(target, Ordering::SeqCst);
        self.compare_enabled.store(enable_irq, Ordering::SeqCst);
        Ok(())
    }

    fn disable_compare(&self) {
        self.compare_enabled.store(false, Ordering::SeqCst);
    }

    fn trigger_overflow(&self) {
        self.ticks
            .store(self.max_ticks.saturating_sub(15), Ordering::SeqCst);
    }
}
