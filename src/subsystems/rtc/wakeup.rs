//! Wakeup scheduling on the counter's compare channel
//!
//! A wakeup is one outstanding compare target plus the handler to notify
//! when it matches. Scheduling again overwrites the target; a match fires
//! the handler once and leaves the request inactive.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::core::traits::{CriticalState, Notifiable};
use crate::platform::{error::RtcError, Result};

/// Compare value for a wakeup `timeout_seconds` after `now_ticks`
///
/// When the target lies past the end of the counter period the value is
/// computed as `(max_ticks - now) + delta`, then masked to the counter
/// width. `max_ticks` must be `2^W - 1`.
///
/// # Errors
///
/// Returns `RtcError::TimeoutTooLong` if the timeout spans more than one
/// counter period.
///
/// # Example
///
/// ```
/// use node_timekeeper::subsystems::rtc::wakeup::compute_compare;
///
/// assert_eq!(compute_compare(0x00FF_FFF0, 4, 8, 0x00FF_FFFF), Ok(47));
/// assert_eq!(compute_compare(100, 4, 8, 0x00FF_FFFF), Ok(132));
/// ```
pub fn compute_compare(
    now_ticks: u32,
    timeout_seconds: u32,
    frequency_hz: u32,
    max_ticks: u32,
) -> Result<u32> {
    let delta = timeout_seconds
        .checked_mul(frequency_hz)
        .filter(|delta| *delta <= max_ticks)
        .ok_or(RtcError::TimeoutTooLong)?;

    let compare = if delta > max_ticks - now_ticks {
        (max_ticks - now_ticks).wrapping_add(delta)
    } else {
        now_ticks + delta
    };
    Ok(compare & max_ticks)
}

/// Pending wakeup request and its handler
pub struct WakeupSlot<'a> {
    handler: CriticalState<Option<&'a dyn Notifiable>>,
    pending: AtomicBool,
}

impl<'a> WakeupSlot<'a> {
    pub const fn new() -> Self {
        Self {
            handler: CriticalState::new(None),
            pending: AtomicBool::new(false),
        }
    }

    pub fn set_handler(&self, handler: Option<&'a dyn Notifiable>) {
        self.handler.replace(handler);
    }

    pub fn arm(&self) {
        self.pending.store(true, Ordering::Release);
    }

    pub fn cancel(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Consume the pending request and notify the handler
    ///
    /// Returns `false` for a compare match with no request outstanding.
    pub fn fire(&self) -> bool {
        if !self.pending.swap(false, Ordering::AcqRel) {
            return false;
        }
        // Copy out first so the handler runs with interrupts enabled
        if let Some(handler) = self.handler.get() {
            handler.notify();
        }
        true
    }
}

impl Default for WakeupSlot<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::PlatformError;
    use core::sync::atomic::AtomicU32;

    const MAX_TICKS: u32 = 0x00FF_FFFF;

    #[test]
    fn test_compare_without_wrap() {
        assert_eq!(compute_compare(0, 1, 8, MAX_TICKS), Ok(8));
        assert_eq!(compute_compare(1_000, 60, 8, MAX_TICKS), Ok(1_480));
    }

    #[test]
    fn test_compare_near_end_of_period() {
        assert_eq!(compute_compare(0x00FF_FFF0, 4, 8, MAX_TICKS), Ok(47));
    }

    #[test]
    fn test_compare_exactly_at_max() {
        assert_eq!(compute_compare(MAX_TICKS - 8, 1, 8, MAX_TICKS), Ok(MAX_TICKS));
    }

    #[test]
    fn test_compare_is_masked_to_counter_width() {
        let compare = compute_compare(1, 2_097_151, 8, MAX_TICKS).unwrap();
        assert!(compare <= MAX_TICKS);
    }

    #[test]
    fn test_timeout_longer_than_period_rejected() {
        assert_eq!(
            compute_compare(0, 2_097_152, 8, MAX_TICKS),
            Err(PlatformError::Rtc(RtcError::TimeoutTooLong))
        );
        assert_eq!(
            compute_compare(0, u32::MAX, 8, MAX_TICKS),
            Err(PlatformError::Rtc(RtcError::TimeoutTooLong))
        );
    }

    #[test]
    fn test_wakeup_slot_fires_once() {
        let count = AtomicU32::new(0);
        let handler = || {
            count.fetch_add(1, Ordering::SeqCst);
        };
        let slot = WakeupSlot::new();
        slot.set_handler(Some(&handler));

        assert!(!slot.fire());
        slot.arm();
        assert!(slot.fire());
        assert!(!slot.fire());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_wakeup_slot_cancel() {
        let slot = WakeupSlot::new();
        slot.arm();
        assert!(slot.cancel());
        assert!(!slot.is_pending());
        assert!(!slot.fire());
    }
}
