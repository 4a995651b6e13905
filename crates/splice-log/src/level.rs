//! Message severity levels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a patcher message.
///
/// Levels are totally ordered from [`Level::Debug`] to [`Level::Fatal`].
/// [`Level::None`] sorts above every real level and is only meaningful as a
/// logging threshold: a logger configured with it reports nothing.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Fatal,
    None,
}

impl Level {
    /// All levels a message can actually be logged at, lowest first.
    pub const REPORTABLE: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
    ];

    /// Short label used when rendering messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::None => "none",
        }
    }

    /// Position of this level in [`Level::REPORTABLE`], or `None` for the
    /// threshold-only [`Level::None`].
    pub(crate) fn slot(self) -> Option<usize> {
        match self {
            Self::Debug => Some(0),
            Self::Info => Some(1),
            Self::Warn => Some(2),
            Self::Error => Some(3),
            Self::Fatal => Some(4),
            Self::None => None,
        }
    }

    /// Returns `true` if a message at `self` passes the given threshold.
    pub fn passes(self, threshold: Level) -> bool {
        self != Self::None && self >= threshold
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
