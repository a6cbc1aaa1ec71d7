//! Synchronized state abstraction for state shared with interrupt handlers.
//!
//! This module provides the `SharedState` trait and its critical-section
//! backed implementation, used wherever foreground code and an interrupt
//! handler touch the same value (handler slots, the log sink).

use core::cell::RefCell;

/// Platform-agnostic synchronized state access.
///
/// # Example
///
/// ```ignore
/// struct Counter {
///     value: u32,
/// }
///
/// fn increment<S: SharedState<Counter>>(state: &S) -> u32 {
///     state.with_mut(|counter| {
///         counter.value += 1;
///         counter.value
///     })
/// }
/// ```
pub trait SharedState<T> {
    /// Access state immutably.
    ///
    /// The provided closure receives an immutable reference to the inner state.
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R;

    /// Access state mutably.
    ///
    /// The provided closure receives a mutable reference to the inner state.
    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R;
}

/// Synchronized state using a `critical_section::Mutex`.
///
/// Every access masks interrupts for the duration of the closure, so the
/// closure must stay a handful of instructions long. On a single core this
/// is all that is needed for atomicity against interrupt preemption.
///
/// `const fn new` allows static initialization.
pub struct CriticalState<T> {
    inner: critical_section::Mutex<RefCell<T>>,
}

impl<T> CriticalState<T> {
    /// Creates a new `CriticalState` wrapping the given value.
    pub const fn new(value: T) -> Self {
        Self {
            inner: critical_section::Mutex::new(RefCell::new(value)),
        }
    }

    /// Replaces the inner value, returning the previous one.
    pub fn replace(&self, value: T) -> T {
        critical_section::with(|cs| self.inner.borrow(cs).replace(value))
    }
}

impl<T: Copy> CriticalState<T> {
    /// Copies the inner value out.
    pub fn get(&self) -> T {
        critical_section::with(|cs| *self.inner.borrow(cs).borrow())
    }
}

impl<T> SharedState<T> for CriticalState<T> {
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        critical_section::with(|cs| f(&self.inner.borrow(cs).borrow()))
    }

    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| f(&mut self.inner.borrow(cs).borrow_mut()))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
