//! Mock tick service for testing

use core::fmt;

use heapless::Vec;

use crate::core::traits::Notifiable;
use crate::platform::{
    error::{PlatformError, TimerError},
    traits::{SlotId, TickServiceInterface},
    Result,
};

/// Default number of slots in the mock pool
pub const DEFAULT_POOL_SIZE: usize = 8;

struct Slot<'a> {
    handler: &'a dyn Notifiable,
    remaining: Option<u32>,
}

/// Mock tick service implementation
///
/// Keeps a fixed pool of single-shot slots. Tests move time forward with
/// [`advance`](MockTickService::advance); expired slots notify their
/// handler after the countdown bookkeeping is done.
pub struct MockTickService<'a, const N: usize = DEFAULT_POOL_SIZE> {
    slots: Vec<Slot<'a>, N>,
    tick_hz: u32,
    min_ticks: u32,
    last_start: Option<(SlotId, u32)>,
}

impl<'a> MockTickService<'a> {
    /// Create a service ticking at 32768 Hz with the default pool size
    pub fn new() -> Self {
        Self::with_pool()
    }
}

impl<'a> Default for MockTickService<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const N: usize> MockTickService<'a, N> {
    /// Create a service with an `N`-slot pool ticking at 32768 Hz
    pub fn with_pool() -> Self {
        Self {
            slots: Vec::new(),
            tick_hz: 32_768,
            min_ticks: 5,
            last_start: None,
        }
    }

    /// Override the tick frequency
    pub fn with_tick_hz(mut self, tick_hz: u32) -> Self {
        self.tick_hz = tick_hz;
        self
    }

    /// Number of allocated slots
    pub fn allocated(&self) -> usize {
        self.slots.len()
    }

    /// Slot and tick count of the most recent `start`
    pub fn last_start(&self) -> Option<(SlotId, u32)> {
        self.last_start
    }

    /// Advance the tick counter, firing every slot that expires
    ///
    /// Returns the number of handlers notified.
    pub fn advance(&mut self, ticks: u32) -> usize {
        let mut expired: Vec<&'a dyn Notifiable, N> = Vec::new();

        for slot in self.slots.iter_mut() {
            if let Some(remaining) = slot.remaining {
                if remaining <= ticks {
                    slot.remaining = None;
                    // One entry per slot, cannot overflow
                    let _ = expired.push(slot.handler);
                } else {
                    slot.remaining = Some(remaining - ticks);
                }
            }
        }

        for handler in expired.iter() {
            handler.notify();
        }
        expired.len()
    }

    fn slot_mut(&mut self, slot: SlotId) -> Result<&mut Slot<'a>> {
        self.slots
            .get_mut(slot.0 as usize)
            .ok_or(PlatformError::Timer(TimerError::InvalidSlot))
    }
}

impl<'a, const N: usize> fmt::Debug for MockTickService<'a, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockTickService")
            .field("allocated", &self.slots.len())
            .field("tick_hz", &self.tick_hz)
            .field("last_start", &self.last_start)
            .finish()
    }
}

impl<'a, const N: usize> TickServiceInterface<'a> for MockTickService<'a, N> {
    fn tick_hz(&self) -> u32 {
        self.tick_hz
    }

    fn min_timeout_ticks(&self) -> u32 {
        self.min_ticks
    }

    fn create_single_shot(&mut self, handler: &'a dyn Notifiable) -> Result<SlotId> {
        let id = SlotId(self.slots.len() as u8);
        self.slots
            .push(Slot {
                handler,
                remaining: None,
            })
            .map_err(|_| PlatformError::Timer(TimerError::PoolExhausted))?;
        Ok(id)
    }

    fn start(&mut self, slot: SlotId, ticks: u32) -> Result<()> {
        self.slot_mut(slot)?.remaining = Some(ticks);
        self.last_start = Some((slot, ticks));
        Ok(())
    }

    fn stop(&mut self, slot: SlotId) -> Result<()> {
        self.slot_mut(slot)?.remaining = None;
        Ok(())
    }

    fn is_running(&self, slot: SlotId) -> bool {
        self.slots
            .get(slot.0 as usize)
            .is_some_and(|s| s.remaining.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_mock_tick_service_fires_once() {
        let fired = AtomicU32::new(0);
        let handler = || {
            fired.fetch_add(1, Ordering::SeqCst);
        };
        let mut service = MockTickService::new();

        let slot = service.create_single_shot(&handler).unwrap();
        service.start(slot, 100).unwrap();
        assert!(service.is_running(slot));
        assert_eq!(service.last_start(), Some((slot, 100)));

        assert_eq!(service.advance(99), 0);
        assert_eq!(service.advance(1), 1);
        assert!(!service.is_running(slot));

        assert_eq!(service.advance(1000), 0);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_mock_tick_service_stop_and_restart() {
        let fired = AtomicU32::new(0);
        let handler = || {
            fired.fetch_add(1, Ordering::SeqCst);
        };
        let mut service = MockTickService::new();
        let slot = service.create_single_shot(&handler).unwrap();

        service.stop(slot).unwrap();
        service.start(slot, 10).unwrap();
        service.advance(5);
        service.start(slot, 10).unwrap();
        service.advance(5);
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        service.stop(slot).unwrap();
        service.advance(100);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_mock_tick_service_pool_exhausted() {
        let handler = || {};
        let mut service: MockTickService<'_, 2> = MockTickService::with_pool();

        service.create_single_shot(&handler).unwrap();
        service.create_single_shot(&handler).unwrap();
        assert_eq!(
            service.create_single_shot(&handler),
            Err(PlatformError::Timer(TimerError::PoolExhausted))
        );
        assert_eq!(service.allocated(), 2);
    }

    #[test]
    fn test_mock_tick_service_unknown_slot() {
        let mut service = MockTickService::new();
        assert_eq!(
            service.start(SlotId(3), 10),
            Err(PlatformError::Timer(TimerError::InvalidSlot))
        );
        assert_eq!(
            service.stop(SlotId(3)),
            Err(PlatformError::Timer(TimerError::InvalidSlot))
        );
        assert!(!service.is_running(SlotId(3)));
    }
}
