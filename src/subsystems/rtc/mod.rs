//! Real-time clock subsystem
//!
//! Turns a free-running hardware counter into a seconds timestamp that
//! survives counter wraparound, and schedules one-shot wakeups on the
//! counter's compare channel.
//!
//! ## Architecture
//!
//! ```text
//!   counter ISR ──► Rtc::on_event ──┬─► TimestampBase += max_ticks / F
//!                                   └─► WakeupSlot::fire ──► handler
//!
//!   foreground ──► Rtc::timestamp  = base + ticks / F
//!              ──► Rtc::schedule_wakeup ──► compute_compare ──► set_compare
//! ```
//!
//! ## Usage
//!
//! ```
//! use node_timekeeper::config::RtcConfig;
//! use node_timekeeper::platform::mock::MockCounter;
//! use node_timekeeper::subsystems::rtc::Rtc;
//!
//! let mut rtc = Rtc::new(MockCounter::new(), RtcConfig::new(8));
//! rtc.init(None).unwrap();
//!
//! rtc.counter().advance(80, |event| rtc.on_event(event));
//! assert_eq!(rtc.timestamp(), 10);
//! ```

pub mod clock;
pub mod wakeup;

use core::sync::atomic::{AtomicBool, Ordering};

use crate::config::RtcConfig;
use crate::core::traits::{Notifiable, Timestamp, TimestampSource};
use crate::platform::{
    error::RtcError,
    traits::{CounterEvent, CounterInterface},
    Result,
};
use crate::{log_debug, log_error, log_info};

pub use clock::{seconds_per_overflow, timestamp_at, TimestampBase};
pub use wakeup::{compute_compare, WakeupSlot};

/// RTC driver
///
/// Owns the counter peripheral. After `init` every method takes `&self`,
/// so the driver can live in a `static` and be reached from the counter
/// interrupt through a shared reference.
pub struct Rtc<'a, C: CounterInterface> {
    counter: C,
    config: RtcConfig,
    base: TimestampBase,
    wakeup: WakeupSlot<'a>,
    initialized: AtomicBool,
}

impl<'a, C: CounterInterface> Rtc<'a, C> {
    pub fn new(counter: C, config: RtcConfig) -> Self {
        Self {
            counter,
            config,
            base: TimestampBase::new(),
            wakeup: WakeupSlot::new(),
            initialized: AtomicBool::new(false),
        }
    }

    /// Program the prescaler and start the counter
    ///
    /// `wakeup` is notified on every compare match that follows a
    /// `schedule_wakeup`.
    ///
    /// # Errors
    ///
    /// Returns `RtcError::InvalidFrequency` if the configured frequency
    /// has no prescaler, or the counter's own init error.
    pub fn init(&mut self, wakeup: Option<&'a dyn Notifiable>) -> Result<()> {
        log_debug!("rtc: init, frequency {} Hz", self.config.frequency_hz);

        let prescaler = self.config.prescaler().inspect_err(|e| {
            log_error!("rtc: no prescaler for {} Hz: {}", self.config.frequency_hz, e);
        })?;

        self.counter.init(prescaler).inspect_err(|e| {
            log_error!("rtc: counter init failed: {}", e);
        })?;

        self.wakeup.set_handler(wakeup);
        self.initialized.store(true, Ordering::Release);

        log_info!(
            "rtc: enabled, prescaler {} max_ticks {}",
            prescaler,
            self.counter.max_ticks()
        );
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Replace the compare-match handler
    pub fn set_wakeup_handler(&self, handler: Option<&'a dyn Notifiable>) {
        self.wakeup.set_handler(handler);
    }

    /// Current timestamp in seconds
    ///
    /// Non-decreasing between calls unless `resynchronize` intervenes.
    pub fn timestamp(&self) -> Timestamp {
        let frequency_hz = self.config.frequency_hz;
        loop {
            let base = self.base.get();
            let ticks = self.counter.read_ticks();
            // An overflow between the two reads would pair the old base
            // with wrapped ticks
            if self.base.get() == base {
                return timestamp_at(base, ticks, frequency_hz);
            }
        }
    }

    /// Current timestamp base (seconds credited by overflows)
    pub fn timestamp_base(&self) -> Timestamp {
        self.base.get()
    }

    /// Overwrite the timestamp base
    ///
    /// Used when the node learns the real time (e.g. from a network
    /// beacon). Timestamps may jump backwards across this call.
    pub fn resynchronize(&self, base: Timestamp) {
        let old = self.base.replace(base);
        log_debug!("rtc: resynchronize old {} new {}", old, base);
    }

    /// Arm a wakeup `timeout_seconds` from now
    ///
    /// Replaces any wakeup already pending. Returns the programmed compare
    /// value.
    ///
    /// # Errors
    ///
    /// Returns `RtcError::NotInitialized` before `init`, or
    /// `RtcError::TimeoutTooLong` if the timeout exceeds one counter
    /// period. Nothing is programmed on error.
    pub fn schedule_wakeup(&self, timeout_seconds: u32) -> Result<u32> {
        log_debug!("rtc: schedule_wakeup {}", timeout_seconds);
        self.ensure_initialized()?;

        let ticks = self.counter.read_ticks();
        let compare = compute_compare(
            ticks,
            timeout_seconds,
            self.config.frequency_hz,
            self.counter.max_ticks(),
        )
        .inspect_err(|e| log_error!("rtc: schedule_wakeup {} s: {}", timeout_seconds, e))?;

        self.wakeup.arm();
        if let Err(e) = self.counter.set_compare(compare, true) {
            self.wakeup.cancel();
            log_error!("rtc: set_compare {} failed: {}", compare, e);
            return Err(e);
        }

        log_debug!("rtc: compare set, ticks {} compare {}", ticks, compare);
        Ok(compare)
    }

    /// Disarm a pending wakeup. Returns whether one was pending.
    pub fn cancel_wakeup(&self) -> bool {
        self.counter.disable_compare();
        let was_pending = self.wakeup.cancel();
        if was_pending {
            log_debug!("rtc: wakeup cancelled");
        }
        was_pending
    }

    pub fn wakeup_pending(&self) -> bool {
        self.wakeup.is_pending()
    }

    /// Counter interrupt entry point
    ///
    /// Called by the platform's counter ISR for every event it clears.
    pub fn on_event(&self, event: CounterEvent) {
        match event {
            CounterEvent::Overflow => {
                let step = seconds_per_overflow(self.counter.max_ticks(), self.config.frequency_hz);
                let old = self.base.advance(step);
                log_debug!("rtc: overflow {} {}", old, old.wrapping_add(step));
            }
            CounterEvent::Compare => {
                // Disarm first so the handler may schedule the next wakeup
                self.counter.disable_compare();
                if self.wakeup.fire() {
                    log_debug!("rtc: compare wakeup");
                } else {
                    log_debug!("rtc: spurious compare ignored");
                }
            }
        }
    }

    /// Force a counter overflow 16 ticks from now (test hook)
    ///
    /// # Errors
    ///
    /// Returns `RtcError::NotInitialized` before `init`.
    pub fn trigger_test_overflow(&self) -> Result<()> {
        self.ensure_initialized()?;
        log_debug!("rtc: test_overflow");
        self.counter.trigger_overflow();
        Ok(())
    }

    pub fn max_ticks(&self) -> u32 {
        self.counter.max_ticks()
    }

    pub fn frequency_hz(&self) -> u32 {
        self.config.frequency_hz
    }

    /// Underlying counter peripheral
    pub fn counter(&self) -> &C {
        &self.counter
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            log_error!("rtc: not initialized");
            Err(RtcError::NotInitialized.into())
        }
    }
}

impl<C: CounterInterface> TimestampSource for Rtc<'_, C> {
    fn now(&self) -> Timestamp {
        self.timestamp()
    }
}
