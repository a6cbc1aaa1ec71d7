//! Time abstraction traits for timestamp queries.
//!
//! This module provides the `TimestampSource` trait that abstracts over the
//! RTC-backed clock and a controllable mock clock, so code that only needs
//! "what second is it" can be tested on the host.

use core::sync::atomic::{AtomicU32, Ordering};

/// Seconds since boot, or since the last resynchronization.
pub type Timestamp = u32;

/// Source of whole-second timestamps.
///
/// # Example
///
/// ```
/// use node_timekeeper::core::traits::{MockClock, TimestampSource};
///
/// let clock = MockClock::new();
/// let saved = clock.now();
/// clock.advance(30);
/// assert_eq!(clock.elapsed_since(saved), 30);
/// ```
pub trait TimestampSource {
    /// Returns the current timestamp in seconds.
    fn now(&self) -> Timestamp;

    /// Returns seconds elapsed since `saved`.
    ///
    /// Saturates at zero when `saved` lies in the future, which happens
    /// after the clock was resynchronized backwards.
    fn elapsed_since(&self, saved: Timestamp) -> u32 {
        self.now().saturating_sub(saved)
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Mock clock with controllable time advancement.
#[derive(Debug, Default)]
pub struct MockClock {
    current: AtomicU32,
}

impl MockClock {
    /// Creates a new `MockClock` starting at 0.
    pub const fn new() -> Self {
        Self {
            current: AtomicU32::new(0),
        }
    }

    /// Creates a new `MockClock` starting at the specified timestamp.
    pub const fn with_initial(seconds: Timestamp) -> Self {
        Self {
            current: AtomicU32::new(seconds),
        }
    }

    /// Sets the current timestamp to an absolute value.
    pub fn set(&self, seconds: Timestamp) {
        self.current.store(seconds, Ordering::Relaxed);
    }

    /// Advances the current timestamp.
    pub fn advance(&self, seconds: u32) {
        self.current.fetch_add(seconds, Ordering::Relaxed);
    }
}

impl TimestampSource for MockClock {
    fn now(&self) -> Timestamp {
        self.current.load(Ordering::Relaxed)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
