//! Prefixed logging for the item under work.

use std::fmt;
use std::sync::Arc;

use splice_log::{Level, Logger};

use crate::flags::{changed_flags, Flag};
use crate::prefix::LogPrefix;

/// The logger plus the prefix naming the item currently being processed.
///
/// One context lives inside each merge call. Entity strategies receive it
/// (directly, or through [`MergeScope`]) so every message they log is
/// qualified with the item it concerns.
///
/// [`MergeScope`]: crate::scope::MergeScope
pub struct LogContext {
    logger: Arc<dyn Logger>,
    prefix: LogPrefix,
}

impl fmt::Debug for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogContext")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl LogContext {
    pub fn new(logger: Arc<dyn Logger>, base_prefix: impl Into<String>) -> Self {
        Self {
            logger,
            prefix: LogPrefix::new(base_prefix),
        }
    }

    /// The shared logger.
    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    /// The current prefix, separator included.
    pub fn prefix(&self) -> &str {
        self.prefix.as_str()
    }

    /// Point the prefix at a new item.
    pub fn set_prefix(&mut self, component: &str) {
        self.prefix.set(component);
    }

    /// Narrow the prefix to a sub-part of the current item.
    pub fn extend_prefix(&mut self, component: &str) {
        self.prefix.extend(component);
    }

    /// Log `message` under the current prefix.
    pub fn log(&self, level: Level, message: &str) {
        self.logger.log(level, &self.prefix.qualify(message));
    }

    pub fn is_logging(&self, level: Level) -> bool {
        self.logger.is_logging(level)
    }

    /// Log one message per flag whose presence differs between `before`
    /// and `after`. Nothing is formatted unless `level` is being logged.
    pub fn check_flags<F>(&self, level: Level, before: u32, after: u32, flags: &[Flag], message: F)
    where
        F: Fn(&Flag) -> String,
    {
        if !self.is_logging(level) {
            return;
        }
        for flag in changed_flags(before, after, flags) {
            self.log(level, &message(flag));
        }
    }
}
