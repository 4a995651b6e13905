use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for a [`MergeEngine`](crate::engine::MergeEngine).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Expected number of source items when the caller gives no hint.
    pub source_size_hint: usize,
    /// Expected number of patch items when the caller gives no hint.
    pub patch_size_hint: usize,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            source_size_hint: 16,
            patch_size_hint: 16,
        }
    }
}

impl MergeConfig {
    /// Parse a configuration from TOML text. Missing keys take their
    /// default values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}
