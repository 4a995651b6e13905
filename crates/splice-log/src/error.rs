//! Error types for logging setup.

use thiserror::Error;

/// Errors that can occur while configuring logging.
#[derive(Debug, Error)]
pub enum LogError {
    /// The configuration text could not be parsed.
    #[error("invalid log config: {0}")]
    Config(#[from] toml::de::Error),

    /// A global subscriber could not be installed.
    #[error("subscriber error: {0}")]
    Subscriber(String),
}

/// Convenience type alias for logging setup results.
pub type Result<T> = std::result::Result<T, LogError>;
