//! Tracing setup and the bridge from the engine's event log.

use emotion_engine::log_buffer::{EventLog, LogEntry, LogLevel};

/// Initialize logging with the specified level. `RUST_LOG` wins when set.
pub fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("emotion_simulator={level},simulator={level}")));

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

/// Drains the engine's event log into tracing.
///
/// Overflow is reported once per batch of lost entries, not on every drain.
#[derive(Debug, Default)]
pub struct LogForwarder {
    reported_dropped: u32,
}

impl LogForwarder {
    pub fn new() -> Self { Self::default() }

    /// Forward buffered events. Returns how many were forwarded.
    pub fn forward(
        &mut self,
        log: &mut EventLog,
    ) -> usize {
        let mut count = 0;
        for entry in log.drain() {
            emit(&entry);
            count += 1;
        }
        let lost = self.take_lost(log.dropped());
        if lost > 0 {
            tracing::trace!(lost, "Engine log overflowed");
        }
        count
    }

    /// Entries lost since the last call, given the log's running total.
    fn take_lost(
        &mut self,
        dropped: u32,
    ) -> u32 {
        let lost = dropped.wrapping_sub(self.reported_dropped);
        self.reported_dropped = dropped;
        lost
    }
}

fn emit(entry: &LogEntry) {
    let at_ms = entry.timestamp_ms;
    let message = entry.message.as_str();
    match entry.level {
        LogLevel::Debug => tracing::debug!(at_ms, "{message}"),
        LogLevel::Info => tracing::info!(at_ms, "{message}"),
        LogLevel::Warn => tracing::warn!(at_ms, "{message}"),
    }
}
