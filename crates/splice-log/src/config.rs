use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::error::{LogError, Result};
use crate::level::Level;

/// Configuration for patcher logging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Lowest level that gets reported.
    pub level: Level,
    /// Whether terminal output uses ANSI colors.
    pub ansi: bool,
    /// Whether events show their `tracing` target.
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            ansi: true,
            with_target: false,
        }
    }
}

impl LogConfig {
    /// Parse a configuration from TOML text. Missing keys take their
    /// default values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// The `tracing` filter equivalent to [`LogConfig::level`].
    pub fn level_filter(&self) -> LevelFilter {
        match self.level {
            Level::Debug => LevelFilter::DEBUG,
            Level::Info => LevelFilter::INFO,
            Level::Warn => LevelFilter::WARN,
            Level::Error | Level::Fatal => LevelFilter::ERROR,
            Level::None => LevelFilter::OFF,
        }
    }
}

/// Install a global `fmt` subscriber for the given configuration.
///
/// Fails (without panicking) if a global subscriber is already set.
pub fn init_subscriber(config: &LogConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(config.level_filter())
        .with_ansi(config.ansi)
        .with_target(config.with_target)
        .try_init()
        .map_err(|e| LogError::Subscriber(e.to_string()))
}
