//! [`Logger`] backed by the `tracing` ecosystem.

use tracing::{debug, error, info, warn};

use crate::config::LogConfig;
use crate::counts::LogCounts;
use crate::level::Level;
use crate::traits::Logger;

/// Forwards patcher messages to `tracing` events.
///
/// Every message is counted, then emitted if it passes the configured
/// threshold. [`Level::Fatal`] maps to an `error` event tagged
/// `fatal = true`. The subscriber installed by the host decides where the
/// events end up.
#[derive(Debug)]
pub struct TracingLogger {
    threshold: Level,
    counts: LogCounts,
}

impl TracingLogger {
    /// Create a logger reporting messages at or above `threshold`.
    pub fn new(threshold: Level) -> Self {
        Self {
            threshold,
            counts: LogCounts::new(),
        }
    }

    /// Create a logger from a [`LogConfig`].
    pub fn from_config(config: &LogConfig) -> Self {
        Self::new(config.level)
    }

    /// The reporting threshold.
    pub fn threshold(&self) -> Level {
        self.threshold
    }

    /// Per-level message counters.
    pub fn counts(&self) -> &LogCounts {
        &self.counts
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::from_config(&LogConfig::default())
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: Level, message: &str) {
        self.counts.record(level);
        if !level.passes(self.threshold) {
            return;
        }
        match level {
            Level::Debug => debug!("{message}"),
            Level::Info => info!("{message}"),
            Level::Warn => warn!("{message}"),
            Level::Error => error!("{message}"),
            Level::Fatal => error!(fatal = true, "{message}"),
            Level::None => {}
        }
    }

    fn is_logging(&self, level: Level) -> bool {
        level.passes(self.threshold)
    }
}
