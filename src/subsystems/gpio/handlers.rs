//! Pin interrupt handler table
//!
//! One handler slot per pin. Foreground code registers and removes
//! handlers; the pin-change interrupt looks them up and invokes them.

use crate::core::traits::{CriticalState, Notifiable};
use crate::log_debug;
use crate::platform::{
    error::GpioError,
    traits::{Polarity, MAX_PINS},
    Result,
};

type Slot<'a> = CriticalState<Option<&'a dyn Notifiable>>;

/// Fixed table mapping pin index to its event handler
///
/// `const fn new` allows the table to live in a `static` shared with the
/// interrupt vector.
///
/// # Example
///
/// ```
/// use core::sync::atomic::{AtomicBool, Ordering};
/// use node_timekeeper::platform::traits::Polarity;
/// use node_timekeeper::subsystems::gpio::HandlerTable;
///
/// static DIO0_SEEN: AtomicBool = AtomicBool::new(false);
/// static HANDLERS: HandlerTable<'static> = HandlerTable::new();
///
/// fn on_dio0() {
///     DIO0_SEEN.store(true, Ordering::SeqCst);
/// }
///
/// HANDLERS.register(5, &on_dio0).unwrap();
/// assert!(HANDLERS.dispatch(5, Polarity::LowToHigh));
/// assert!(DIO0_SEEN.load(Ordering::SeqCst));
/// ```
pub struct HandlerTable<'a> {
    slots: [Slot<'a>; MAX_PINS],
}

impl<'a> HandlerTable<'a> {
    pub const fn new() -> Self {
        Self {
            slots: [const { CriticalState::new(None) }; MAX_PINS],
        }
    }

    /// Install `handler` for `pin`, replacing any previous one
    ///
    /// # Errors
    ///
    /// Returns `GpioError::InvalidPin` if `pin` is out of range.
    pub fn register(&self, pin: u8, handler: &'a dyn Notifiable) -> Result<()> {
        self.slot(pin)?.replace(Some(handler));
        Ok(())
    }

    /// Clear the handler for `pin`, returning it
    pub fn remove(&self, pin: u8) -> Option<&'a dyn Notifiable> {
        self.slot(pin).ok().and_then(|slot| slot.replace(None))
    }

    pub fn handler(&self, pin: u8) -> Option<&'a dyn Notifiable> {
        self.slot(pin).ok().and_then(|slot| slot.get())
    }

    pub fn is_registered(&self, pin: u8) -> bool {
        self.handler(pin).is_some()
    }

    /// Deliver a pin event
    ///
    /// Called from the pin-change interrupt. Invokes the handler for
    /// `pin` if one is registered and returns whether it ran. Out-of-range
    /// or unregistered pins are ignored.
    pub fn dispatch(&self, pin: u8, polarity: Polarity) -> bool {
        let handler = self.handler(pin);
        log_debug!("gpio: int {} {:?} {}", pin, polarity, handler.is_some());
        match handler {
            Some(handler) => {
                handler.notify();
                true
            }
            None => false,
        }
    }

    /// Remove every handler
    pub fn clear(&self) {
        for slot in self.slots.iter() {
            slot.replace(None);
        }
    }

    fn slot(&self, pin: u8) -> Result<&Slot<'a>> {
        self.slots
            .get(pin as usize)
            .ok_or(GpioError::InvalidPin.into())
    }
}

impl Default for HandlerTable<'_> {
    fn default() -> Self {
        Self::new()
    }
}
