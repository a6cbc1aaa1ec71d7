//! Interrupt-context notification capability.
//!
//! Handlers registered with the wakeup scheduler, the software timers and
//! the GPIO dispatch table are all invoked the same way: from interrupt
//! context, with no arguments, in O(1) and without allocating.

/// Something that can be poked from interrupt context.
///
/// Implemented for plain structs (e.g. an `AtomicBool` flag the main loop
/// polls) and, through the blanket impl, for any `Fn() + Sync` closure.
///
/// # Example
///
/// ```
/// use core::sync::atomic::{AtomicU32, Ordering};
/// use node_timekeeper::core::traits::Notifiable;
///
/// static DIO0_EVENTS: AtomicU32 = AtomicU32::new(0);
///
/// let on_dio0 = || {
///     DIO0_EVENTS.fetch_add(1, Ordering::Relaxed);
/// };
/// on_dio0.notify();
/// assert_eq!(DIO0_EVENTS.load(Ordering::Relaxed), 1);
/// ```
pub trait Notifiable: Sync {
    /// Invoked once per event. Keep it short; it runs in interrupt context.
    fn notify(&self);
}

impl<F> Notifiable for F
where
    F: Fn() + Sync,
{
    fn notify(&self) {
        self()
    }
}
