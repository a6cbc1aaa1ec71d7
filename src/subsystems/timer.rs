//! Software timers
//!
//! Single-shot timers layered on the platform tick service. Each timer
//! owns one tick-service slot, bound to its handler when the timer is
//! created. Time queries delegate to the RTC-backed clock.
//!
//! ## Usage
//!
//! ```
//! use node_timekeeper::platform::mock::MockTickService;
//! use node_timekeeper::subsystems::timer::{SoftwareTimer, TimerState};
//!
//! let on_expiry = || {};
//! let mut ticks = MockTickService::new();
//!
//! let mut timer = SoftwareTimer::create(&mut ticks, &on_expiry).unwrap();
//! timer.set_timeout(250);
//! timer.start(&mut ticks).unwrap();
//! assert_eq!(timer.state(&ticks), TimerState::Armed);
//! ```

use crate::config::{TimerConfig, TIMER_MIN_TIMEOUT_MS};
use crate::core::traits::{Notifiable, Timestamp, TimestampSource};
use crate::platform::{
    error::TimerError,
    traits::{SlotId, TickServiceInterface},
    Result,
};
use crate::{log_debug, log_error};

/// Timer countdown state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerState {
    /// Not counting down
    Idle,
    /// Countdown pending; the handler runs on expiry
    Armed,
}

/// Single-shot software timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SoftwareTimer {
    slot: Option<SlotId>,
    timeout_ms: u32,
    min_timeout_ms: u32,
}

impl SoftwareTimer {
    /// Declare a timer that is not yet bound to a tick slot
    pub const fn new() -> Self {
        Self::with_config(TimerConfig {
            min_timeout_ms: TIMER_MIN_TIMEOUT_MS,
        })
    }

    /// Declare an unbound timer with an explicit timeout floor
    ///
    /// The timeout starts at zero, so `set_timeout` must run before the
    /// first `start`.
    pub const fn with_config(config: TimerConfig) -> Self {
        Self {
            slot: None,
            timeout_ms: 0,
            min_timeout_ms: config.min_timeout_ms,
        }
    }

    /// Create a timer bound to `handler`
    ///
    /// # Errors
    ///
    /// Returns `TimerError::PoolExhausted` when the tick service has no
    /// free slot.
    pub fn create<'a, S>(service: &mut S, handler: &'a dyn Notifiable) -> Result<Self>
    where
        S: TickServiceInterface<'a>,
    {
        let mut timer = Self::new();
        timer.init(service, handler)?;
        Ok(timer)
    }

    /// Bind a declared timer to `handler`
    ///
    /// # Errors
    ///
    /// Returns `TimerError::AlreadyInitialized` if the timer already owns
    /// a slot, or the tick service's allocation error.
    pub fn init<'a, S>(&mut self, service: &mut S, handler: &'a dyn Notifiable) -> Result<()>
    where
        S: TickServiceInterface<'a>,
    {
        if let Some(slot) = self.slot {
            log_error!("timer: slot {} already initialized", slot.0);
            return Err(TimerError::AlreadyInitialized.into());
        }

        let slot = service
            .create_single_shot(handler)
            .inspect_err(|e| log_error!("timer: create failed: {}", e))?;
        self.slot = Some(slot);

        log_debug!("timer: created slot {}", slot.0);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.slot.is_some()
    }

    /// Tick-service slot owned by this timer
    pub fn slot(&self) -> Option<SlotId> {
        self.slot
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Set the timeout used by the next `start`
    ///
    /// Values below the configured floor are raised to it. Returns the
    /// timeout actually stored.
    pub fn set_timeout(&mut self, timeout_ms: u32) -> u32 {
        self.timeout_ms = timeout_ms.max(self.min_timeout_ms);
        log_debug!("timer: set_timeout {} -> {}", timeout_ms, self.timeout_ms);
        self.timeout_ms
    }

    /// Arm a single-shot countdown of `timeout_ms`
    ///
    /// Restarts the countdown if the timer is already armed.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::NotInitialized` if the timer was never
    /// created, `TimerError::ZeroTimeout` if the timeout is zero, or the
    /// tick service's start error.
    pub fn start<'a, S>(&mut self, service: &mut S) -> Result<()>
    where
        S: TickServiceInterface<'a>,
    {
        let slot = self.bound_slot()?;
        if self.timeout_ms == 0 {
            log_error!("timer: slot {} started without timeout", slot.0);
            return Err(TimerError::ZeroTimeout.into());
        }

        let ticks = ms_to_ticks(self.timeout_ms, service.tick_hz()).max(service.min_timeout_ticks());
        log_debug!("timer: start slot {} {} ms ({} ticks)", slot.0, self.timeout_ms, ticks);

        service
            .start(slot, ticks)
            .inspect_err(|e| log_error!("timer: start slot {} failed: {}", slot.0, e))
    }

    /// Cancel the countdown. Stopping an idle timer is not an error.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::NotInitialized` if the timer was never
    /// created, or the tick service's stop error.
    pub fn stop<'a, S>(&mut self, service: &mut S) -> Result<()>
    where
        S: TickServiceInterface<'a>,
    {
        let slot = self.bound_slot()?;
        log_debug!("timer: stop slot {}", slot.0);
        service
            .stop(slot)
            .inspect_err(|e| log_error!("timer: stop slot {} failed: {}", slot.0, e))
    }

    pub fn state<'a, S>(&self, service: &S) -> TimerState
    where
        S: TickServiceInterface<'a>,
    {
        match self.slot {
            Some(slot) if service.is_running(slot) => TimerState::Armed,
            _ => TimerState::Idle,
        }
    }

    fn bound_slot(&self) -> Result<SlotId> {
        self.slot.ok_or_else(|| {
            log_error!("timer: not initialized");
            TimerError::NotInitialized.into()
        })
    }
}

impl Default for SoftwareTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert milliseconds to service ticks, rounding to nearest
pub fn ms_to_ticks(ms: u32, tick_hz: u32) -> u32 {
    let ticks = (ms as u64 * tick_hz as u64 + 500) / 1000;
    ticks.min(u32::MAX as u64) as u32
}

/// Current time in seconds
pub fn current_time<C: TimestampSource + ?Sized>(clock: &C) -> Timestamp {
    clock.now()
}

/// Seconds since `saved`, or 0 if `saved` is not in the past
pub fn elapsed_since<C: TimestampSource + ?Sized>(clock: &C, saved: Timestamp) -> u32 {
    clock.elapsed_since(saved)
}
