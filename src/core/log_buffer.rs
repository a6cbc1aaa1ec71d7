//! Log Ring Buffer
//!
//! Provides a fixed-capacity ring buffer for storing log records until the
//! main loop drains them to a transport (UART, RTT, radio uplink).
//! Uses heapless HistoryBuf for no-allocation storage.
//!
//! ## Features
//!
//! - Fixed capacity of 16 messages (~1.6 KB RAM)
//! - Automatic oldest message eviction when full
//! - Overflow tracking for diagnostics
//! - Oldest-first iteration order

use heapless::{HistoryBuf, String, Vec};

/// Buffer capacity in number of messages
pub const LOG_BUFFER_SIZE: usize = 16;

/// Maximum message size in bytes
pub const LOG_MSG_SIZE: usize = 96;

/// Log level with ordering: Trace < Debug < Info < Warn < Error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    /// Fixed-width tag used when a record is printed
    pub const fn tag(self) -> &'static str {
        match self {
            LogLevel::Trace => "[TRACE]",
            LogLevel::Debug => "[DEBUG]",
            LogLevel::Info => "[INFO] ",
            LogLevel::Warn => "[WARN] ",
            LogLevel::Error => "[ERROR]",
        }
    }
}

/// Log message containing level and text
#[derive(Clone)]
pub struct LogMessage {
    pub level: LogLevel,
    pub message: String<LOG_MSG_SIZE>,
}

impl LogMessage {
    /// Create a new log message
    pub fn new(level: LogLevel, message: String<LOG_MSG_SIZE>) -> Self {
        Self { level, message }
    }
}

/// Ring buffer sink for log messages
///
/// Stores up to LOG_BUFFER_SIZE messages. When full, the oldest message
/// is automatically evicted to make room for new messages.
pub struct RingBufferSink {
    buffer: HistoryBuf<LogMessage, LOG_BUFFER_SIZE>,
    overflow_count: u32,
}

impl RingBufferSink {
    /// Create a new empty ring buffer sink
    pub const fn new() -> Self {
        Self {
            buffer: HistoryBuf::new(),
            overflow_count: 0,
        }
    }

    /// Push a message to the buffer
    ///
    /// If the buffer is full, the oldest message is evicted and
    /// overflow_count is incremented.
    pub fn push(&mut self, msg: LogMessage) {
        if self.buffer.len() == LOG_BUFFER_SIZE {
            self.overflow_count = self.overflow_count.saturating_add(1);
        }
        self.buffer.write(msg);
    }

    /// Return the current number of messages in the buffer
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Return true if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    /// Return the number of messages lost due to buffer overflow
    pub fn overflow_count(&self) -> u32 {
        self.overflow_count
    }

    /// Iterate over messages in oldest-first order
    pub fn iter(&self) -> impl Iterator<Item = &LogMessage> {
        self.buffer.oldest_ordered()
    }

    /// Drain all messages from the buffer, returning them in oldest-first order
    ///
    /// The buffer is cleared after draining.
    pub fn drain(&mut self) -> Vec<LogMessage, LOG_BUFFER_SIZE> {
        let mut result = Vec::new();
        for msg in self.buffer.oldest_ordered() {
            let _ = result.push(msg.clone());
        }
        self.buffer.clear();
        result
    }
}

impl Default for RingBufferSink {
    fn default() -> Self {
        Self::new()
    }
}
