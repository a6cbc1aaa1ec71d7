//! Timekeeping and event-dispatch subsystems
//!
//! - [`rtc`]: seconds clock over the hardware counter, and wakeups
//! - [`timer`]: single-shot software timers on the tick service
//! - [`gpio`]: pin configuration and edge-event dispatch

pub mod gpio;
pub mod rtc;
pub mod timer;
