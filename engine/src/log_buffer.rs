//! Engine event log.
//!
//! The engine records cycle transitions, emotion picks, restarts and macro
//! runs into a fixed-size ring buffer. Hosts drain it at their own pace and
//! forward entries to whatever logger they use; the engine itself never
//! blocks on logging.
//!
//! # Usage
//!
//! ```ignore
//! let mut log = EventLog::new();
//! log_info!(log, now, "picked {}", id.name());
//!
//! for entry in log.drain() {
//!     println!("[{}] {}", entry.timestamp_ms, entry.message);
//! }
//! ```

use heapless::{Deque, String};

// =============================================================================
// Log Configuration
// =============================================================================

/// Maximum number of entries kept before the oldest is dropped.
pub const LOG_ENTRIES: usize = 16;

/// Maximum characters per message. Longer messages are truncated.
pub const LOG_MSG_LEN: usize = 48;

// =============================================================================
// Log Entry
// =============================================================================

/// Severity of a log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl LogLevel {
    /// Short prefix for text output.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Debug => "[DBG]",
            Self::Info => "[INF]",
            Self::Warn => "[WRN]",
        }
    }
}

/// One recorded event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub timestamp_ms: u32,
    pub message: String<LOG_MSG_LEN>,
}

impl LogEntry {
    /// Create an entry, truncating `message` on a character boundary.
    pub fn new(
        level: LogLevel,
        message: &str,
        timestamp_ms: u32,
    ) -> Self {
        let mut msg = String::new();
        for c in message.chars() {
            if msg.push(c).is_err() {
                break;
            }
        }
        Self {
            level,
            timestamp_ms,
            message: msg,
        }
    }
}

// =============================================================================
// Event Log Ring Buffer
// =============================================================================

/// Ring buffer of the most recent [`LOG_ENTRIES`] events.
pub struct EventLog {
    entries: Deque<LogEntry, LOG_ENTRIES>,
    dropped: u32,
}

impl EventLog {
    /// Create an empty log.
    pub const fn new() -> Self {
        Self {
            entries: Deque::new(),
            dropped: 0,
        }
    }

    /// Push an entry. If the buffer is full the oldest entry is dropped.
    pub fn push(
        &mut self,
        entry: LogEntry,
    ) {
        if self.entries.is_full() {
            self.entries.pop_front();
            self.dropped = self.dropped.wrapping_add(1);
        }
        self.entries.push_back(entry).ok();
    }

    /// Record a message at `level`.
    pub fn record(
        &mut self,
        level: LogLevel,
        timestamp_ms: u32,
        message: &str,
    ) {
        self.push(LogEntry::new(level, message, timestamp_ms));
    }

    /// Number of buffered entries.
    #[inline]
    pub fn len(&self) -> usize { self.entries.len() }

    /// Whether nothing is buffered.
    #[inline]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Entries lost to overflow since creation.
    #[inline]
    pub const fn dropped(&self) -> u32 { self.dropped }

    /// Iterate over entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> { self.entries.iter() }

    /// Remove and yield entries from oldest to newest.
    pub fn drain(&mut self) -> impl Iterator<Item = LogEntry> + '_ { core::iter::from_fn(move || self.entries.pop_front()) }
}

impl Default for EventLog {
    fn default() -> Self { Self::new() }
}

/// Record a formatted message at Info level.
#[macro_export]
macro_rules! log_info {
    ($log:expr, $now:expr, $($arg:tt)*) => {{
        use core::fmt::Write;
        let mut buf: heapless::String<{ $crate::log_buffer::LOG_MSG_LEN }> = heapless::String::new();
        let _ = write!(buf, $($arg)*);
        $log.record($crate::log_buffer::LogLevel::Info, $now, buf.as_str());
    }};
}

/// Record a formatted message at Debug level.
#[macro_export]
macro_rules! log_debug {
    ($log:expr, $now:expr, $($arg:tt)*) => {{
        use core::fmt::Write;
        let mut buf: heapless::String<{ $crate::log_buffer::LOG_MSG_LEN }> = heapless::String::new();
        let _ = write!(buf, $($arg)*);
        $log.record($crate::log_buffer::LogLevel::Debug, $now, buf.as_str());
    }};
}

/// Record a formatted message at Warn level.
#[macro_export]
macro_rules! log_warn {
    ($log:expr, $now:expr, $($arg:tt)*) => {{
        use core::fmt::Write;
        let mut buf: heapless::String<{ $crate::log_buffer::LOG_MSG_LEN }> = heapless::String::new();
        let _ = write!(buf, $($arg)*);
        $log.record($crate::log_buffer::LogLevel::Warn, $now, buf.as_str());
    }};
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_order() {
        let mut log = EventLog::new();
        assert!(log.is_empty());
        log.record(LogLevel::Info, 1, "first");
        log.record(LogLevel::Debug, 2, "second");
        assert_eq!(log.len(), 2);
        let msgs: Vec<&str> = log.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(msgs, ["first", "second"]);
    }

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let mut log = EventLog::new();
        for i in 0..(LOG_ENTRIES as u32 + 3) {
            log.record(LogLevel::Info, i, "tick");
        }
        assert_eq!(log.len(), LOG_ENTRIES);
        assert_eq!(log.dropped(), 3);
        assert_eq!(log.iter().next().map(|e| e.timestamp_ms), Some(3));
    }

    #[test]
    fn test_truncation() {
        let long_msg = "This message is much longer than the forty-eight characters allowed";
        let entry = LogEntry::new(LogLevel::Warn, long_msg, 0);
        assert_eq!(entry.message.len(), LOG_MSG_LEN);
        assert!(long_msg.starts_with(entry.message.as_str()));
    }

    #[test]
    fn test_macros_format() {
        let mut log = EventLog::new();
        log_info!(log, 10, "picked {} ({} ms)", "sad", 8000);
        log_debug!(log, 11, "state {}", 3);
        log_warn!(log, 12, "odd");
        let entries: Vec<LogEntry> = log.drain().collect();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].message.as_str(), "picked sad (8000 ms)");
        assert_eq!(entries[0].level, LogLevel::Info);
        assert_eq!(entries[1].level, LogLevel::Debug);
        assert_eq!(entries[2].timestamp_ms, 12);
        assert!(log.is_empty(), "drain empties the buffer");
    }
}
