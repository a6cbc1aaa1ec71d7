//! Logging abstraction
//!
//! Provides unified logging macros that work across different targets:
//! - Embedded (`defmt` feature): forwards to defmt
//! - Buffered (`log-buffer` feature): formats into the global ring buffer,
//!   which the main loop drains with [`drain_logs`]
//! - Host tests: Uses println!
//! - Otherwise: No-op
//!
//! Both embedded features may be enabled together; each record then goes
//! to both sinks.
//!
//! ## Draining the buffer
//!
//! ```ignore
//! loop {
//!     for record in node_timekeeper::core::logging::drain_logs() {
//!         uart.write_line(record.level.tag(), record.message.as_str());
//!     }
//!     radio_state_machine.step();
//! }
//! ```

use core::fmt::Write;

use crate::core::log_buffer::{
    LogLevel, LogMessage, RingBufferSink, LOG_BUFFER_SIZE, LOG_MSG_SIZE,
};
use crate::core::traits::{CriticalState, SharedState};
use heapless::{String, Vec};

/// Global log sink shared by foreground code and interrupt handlers
static LOG_SINK: CriticalState<RingBufferSink> = CriticalState::new(RingBufferSink::new());

/// Format a record and push it into the global ring buffer
///
/// Messages longer than the record capacity are truncated. Safe to call
/// from interrupt context.
pub fn push_log(level: LogLevel, args: core::fmt::Arguments<'_>) {
    let mut message = String::new();
    // Truncation is reported as fmt::Error; keep what fit.
    let _ = Truncating(&mut message).write_fmt(args);
    let record = LogMessage::new(level, message);
    LOG_SINK.with_mut(|sink| sink.push(record));
}

/// Writer that keeps the prefix that fits instead of dropping the write
struct Truncating<'a>(&'a mut String<LOG_MSG_SIZE>);

impl Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                return Err(core::fmt::Error);
            }
        }
        Ok(())
    }
}

/// Get all buffered logs (drains the buffer)
pub fn drain_logs() -> Vec<LogMessage, LOG_BUFFER_SIZE> {
    LOG_SINK.with_mut(|sink| sink.drain())
}

/// Get the current number of buffered messages
pub fn buffered_len() -> usize {
    LOG_SINK.with(|sink| sink.len())
}

/// Get the number of records lost to buffer overflow since boot
pub fn overflow_count() -> u32 {
    LOG_SINK.with(|sink| sink.overflow_count())
}

/// Shared body of the level macros
#[doc(hidden)]
#[macro_export]
macro_rules! __node_log {
    ($defmt_macro:ident, $level:ident, $tag:literal, $($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::$defmt_macro!($($arg)*);

        #[cfg(feature = "log-buffer")]
        $crate::core::logging::push_log(
            $crate::core::log_buffer::LogLevel::$level,
            ::core::format_args!($($arg)*),
        );

        #[cfg(test)]
        println!("{} {}", $tag, format!($($arg)*));

        #[cfg(not(any(feature = "defmt", feature = "log-buffer", test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::__node_log!(info, Info, "[INFO] ", $($arg)*)
    };
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::__node_log!(warn, Warn, "[WARN] ", $($arg)*)
    };
}

/// Log error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::__node_log!(error, Error, "[ERROR]", $($arg)*)
    };
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::__node_log!(debug, Debug, "[DEBUG]", $($arg)*)
    };
}

/// Log trace message
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {
        $crate::__node_log!(trace, Trace, "[TRACE]", $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_log_formats_and_drains() {
        push_log(LogLevel::Warn, format_args!("rtc: compare {} of {}", 47, 0xFF_FFFF));

        let drained = drain_logs();
        // Other tests may log concurrently; look for our record only.
        let ours = drained
            .iter()
            .find(|m| m.message.as_str() == "rtc: compare 47 of 16777215");
        assert!(ours.is_some());
        assert_eq!(ours.map(|m| m.level), Some(LogLevel::Warn));
    }

    #[test]
    fn truncating_writer_keeps_prefix() {
        let long = "x".repeat(200);
        let mut message = String::new();
        let result = Truncating(&mut message).write_fmt(format_args!("dio{} {}", 0, long));
        assert!(result.is_err());
        assert_eq!(message.len(), LOG_MSG_SIZE);
        assert!(message.as_str().starts_with("dio0 xxx"));
    }

    #[test]
    fn macros_expand_in_host_tests() {
        crate::log_info!("gpio: pin {} ready", 5);
        crate::log_debug!("timer: {} ms", 10);
        crate::log_trace!("trace {}", 1);
        crate::log_warn!("warn");
        crate::log_error!("error {}", "x");
    }
}
