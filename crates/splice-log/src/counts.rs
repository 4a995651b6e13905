//! Per-level message counters.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::level::Level;

/// Thread-safe tally of messages per reportable level.
///
/// Counting is independent of any reporting threshold so that the host can
/// always tell whether a run produced errors, even when output is muted.
#[derive(Debug, Default)]
pub struct LogCounts {
    counts: [AtomicUsize; 5],
}

impl LogCounts {
    /// Create a zeroed tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one message at `level`. [`Level::None`] is ignored.
    pub fn record(&self, level: Level) {
        if let Some(slot) = level.slot() {
            self.counts[slot].fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Number of messages counted at exactly `level`.
    pub fn get(&self, level: Level) -> usize {
        level
            .slot()
            .map_or(0, |slot| self.counts[slot].load(Ordering::Relaxed))
    }

    /// Number of warnings.
    pub fn warnings(&self) -> usize {
        self.get(Level::Warn)
    }

    /// Number of errors, fatal ones included.
    pub fn errors(&self) -> usize {
        self.get(Level::Error) + self.get(Level::Fatal)
    }

    /// Reset every counter to zero.
    pub fn reset(&self) {
        for counter in &self.counts {
            counter.store(0, Ordering::Relaxed);
        }
    }
}
