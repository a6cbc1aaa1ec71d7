//! Timestamp base and clock arithmetic
//!
//! The timestamp is `base + ticks / F`. The base absorbs one counter
//! period (in whole seconds) per overflow and is the only state the clock
//! keeps; everything else is read from the counter.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::core::traits::Timestamp;

/// Seconds accumulated from counter overflows
///
/// Written from the overflow interrupt and read from the foreground. The
/// value fits one machine word, so an atomic is all the synchronization
/// it needs.
#[derive(Debug)]
pub struct TimestampBase {
    seconds: AtomicU32,
}

impl TimestampBase {
    pub const fn new() -> Self {
        Self {
            seconds: AtomicU32::new(0),
        }
    }

    pub fn get(&self) -> Timestamp {
        self.seconds.load(Ordering::Acquire)
    }

    /// Add `seconds` (wrapping), returning the previous base
    pub fn advance(&self, seconds: u32) -> Timestamp {
        self.seconds.fetch_add(seconds, Ordering::AcqRel)
    }

    /// Overwrite the base, returning the previous one
    pub fn replace(&self, seconds: Timestamp) -> Timestamp {
        self.seconds.swap(seconds, Ordering::AcqRel)
    }
}

impl Default for TimestampBase {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole seconds credited per counter overflow
///
/// Integer division; the residual ticks of each period are dropped.
pub const fn seconds_per_overflow(max_ticks: u32, frequency_hz: u32) -> u32 {
    match max_ticks.checked_div(frequency_hz) {
        Some(seconds) => seconds,
        None => 0,
    }
}

/// Timestamp for a given base and counter value
pub const fn timestamp_at(base: Timestamp, ticks: u32, frequency_hz: u32) -> Timestamp {
    let seconds = match ticks.checked_div(frequency_hz) {
        Some(seconds) => seconds,
        None => 0,
    };
    base.wrapping_add(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX_TICKS: u32 = 0x00FF_FFFF;

    #[test]
    fn test_seconds_per_overflow_drops_residual() {
        assert_eq!(seconds_per_overflow(MAX_TICKS, 8), 2_097_151);
        assert_eq!(seconds_per_overflow(MAX_TICKS, 1), MAX_TICKS);
        assert_eq!(seconds_per_overflow(MAX_TICKS, 0), 0);
    }

    #[test]
    fn test_base_after_overflows() {
        let base = TimestampBase::new();
        let step = seconds_per_overflow(MAX_TICKS, 8);
        for _ in 0..5 {
            base.advance(step);
        }
        assert_eq!(base.get(), 5 * step);
    }

    #[test]
    fn test_replace_returns_previous() {
        let base = TimestampBase::new();
        base.advance(100);
        assert_eq!(base.replace(7), 100);
        assert_eq!(base.get(), 7);
    }

    #[test]
    fn test_timestamp_non_decreasing_with_ticks() {
        let mut last = 0;
        for ticks in (0..=MAX_TICKS).step_by(4099) {
            let ts = timestamp_at(1_000, ticks, 8);
            assert!(ts >= last);
            last = ts;
        }
        assert_eq!(timestamp_at(1_000, 80, 8), 1_010);
    }

    #[test]
    fn test_timestamp_wraps() {
        assert_eq!(timestamp_at(u32::MAX, 16, 8), 1);
    }
}
