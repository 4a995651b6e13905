//! The [`Logger`] trait every message sink implements.

use crate::level::Level;

/// Destination for fully-qualified patcher messages.
///
/// The merge engine composes the message (context prefix included) and hands
/// it over in one piece; sinks decide formatting and delivery. Implementations
/// must be cheap to query through [`Logger::is_logging`] because callers use
/// it to skip building diagnostics nobody will see.
pub trait Logger: Send + Sync {
    /// Record a message at the given level.
    fn log(&self, level: Level, message: &str);

    /// Returns `true` if messages at `level` would be reported.
    fn is_logging(&self, level: Level) -> bool;
}

