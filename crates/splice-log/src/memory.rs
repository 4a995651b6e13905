//! In-memory logger for testing and embedding.
//!
//! [`MemoryLogger`] keeps every reported message in a `Vec` behind a
//! `Mutex`. It implements [`Logger`] and is suitable for unit tests and
//! hosts that want to inspect diagnostics after a run.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::counts::LogCounts;
use crate::level::Level;
use crate::traits::Logger;

/// A message captured by [`MemoryLogger`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRecord {
    pub level: Level,
    pub message: String,
}

/// An in-memory implementation of [`Logger`].
///
/// Messages below the threshold are counted but not stored.
#[derive(Debug)]
pub struct MemoryLogger {
    threshold: Level,
    records: Mutex<Vec<LogRecord>>,
    counts: LogCounts,
}

impl MemoryLogger {
    /// Create a logger that records every level.
    pub fn new() -> Self {
        Self::with_threshold(Level::Debug)
    }

    /// Create a logger that records messages at or above `threshold`.
    pub fn with_threshold(threshold: Level) -> Self {
        Self {
            threshold,
            records: Mutex::new(Vec::new()),
            counts: LogCounts::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of all recorded messages in logging order.
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    /// Recorded messages at exactly `level`.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|r| r.level == level)
            .map(|r| r.message.clone())
            .collect()
    }

    /// Returns `true` if some recorded message at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.lock()
            .iter()
            .any(|r| r.level == level && r.message.contains(needle))
    }

    /// Per-level message counters.
    pub fn counts(&self) -> &LogCounts {
        &self.counts
    }

    /// Drop all recorded messages and reset the counters.
    pub fn clear(&self) {
        self.lock().clear();
        self.counts.reset();
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: Level, message: &str) {
        self.counts.record(level);
        if level.passes(self.threshold) {
            self.lock().push(LogRecord {
                level,
                message: message.to_string(),
            });
        }
    }

    fn is_logging(&self, level: Level) -> bool {
        level.passes(self.threshold)
    }
}
