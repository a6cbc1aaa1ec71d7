#![cfg_attr(not(test), no_std)]

//! node_timekeeper - Timekeeping and event dispatch for battery-powered radio nodes
//!
//! This library provides a seconds clock built on a 24-bit hardware
//! real-time counter, compare-channel wakeups, single-shot software timers,
//! and GPIO edge-event dispatch, all behind a small platform abstraction.

// Platform abstraction layer
pub mod platform;

// Logging and shared-state primitives
pub mod core;

// RTC, software timers and GPIO dispatch
pub mod subsystems;

// Build-time timing configuration
pub mod config;

// Board bring-up
pub mod board;
