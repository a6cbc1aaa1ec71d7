//! Core traits shared by the timekeeping and dispatch subsystems.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                  Application / radio state machine            │
//! │                               │                               │
//! │                               ▼                               │
//! │  ┌─────────────────┐ ┌──────────────────┐ ┌─────────────────┐ │
//! │  │ TimestampSource │ │ Notifiable       │ │ SharedState<T>  │ │
//! │  │ + now()         │ │ + notify()       │ │ + with()        │ │
//! │  │ + elapsed_since │ │   (ISR context)  │ │ + with_mut()    │ │
//! │  └─────────────────┘ └──────────────────┘ └─────────────────┘ │
//! │          │                    │                    │          │
//! │          ▼                    ▼                    ▼          │
//! │   Rtc, MockClock      closures, flags       CriticalState<T>  │
//! └───────────────────────────────────────────────────────────────┘
//! ```

pub mod notify;
pub mod sync;
pub mod time;

pub use notify::Notifiable;
pub use sync::{CriticalState, SharedState};
pub use time::{MockClock, Timestamp, TimestampSource};
