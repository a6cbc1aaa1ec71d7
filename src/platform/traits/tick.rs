//! Platform tick service interface trait
//!
//! The tick service is the platform's own pool of software timer slots
//! (e.g. the nRF5 SDK `app_timer` module), clocked from a low-frequency
//! tick. The software timer layer in `subsystems::timer` sits on top of it.

use crate::core::traits::Notifiable;
use crate::platform::Result;

/// Identifier of one allocated slot in the tick service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlotId(pub u8);

/// Tick service interface trait
///
/// # Safety Invariants
///
/// - A slot is owned by exactly one software timer for its lifetime
/// - Handlers run in interrupt context
pub trait TickServiceInterface<'a> {
    /// Tick frequency in Hz after the service prescaler
    fn tick_hz(&self) -> u32;

    /// Smallest tick count the service can reliably time
    fn min_timeout_ticks(&self) -> u32;

    /// Allocate a single-shot slot bound to `handler`
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Timer(TimerError::PoolExhausted)` when no
    /// slot is left.
    fn create_single_shot(&mut self, handler: &'a dyn Notifiable) -> Result<SlotId>;

    /// Arm `slot` to fire once after `ticks` ticks (restarts a running slot)
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Timer(TimerError::InvalidSlot)` for an
    /// unknown slot.
    fn start(&mut self, slot: SlotId, ticks: u32) -> Result<()>;

    /// Cancel a pending countdown. Stopping an idle slot is not an error.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Timer(TimerError::InvalidSlot)` for an
    /// unknown slot.
    fn stop(&mut self, slot: SlotId) -> Result<()>;

    /// Whether `slot` has a countdown pending
    fn is_running(&self, slot: SlotId) -> bool;
}
