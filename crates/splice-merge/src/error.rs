//! Error types for the merge engine.
//!
//! Two families are kept strictly apart:
//!
//! - [`PatchError`] is recoverable. It is caused by patch data, returned
//!   through `Result`, and always ends up as an ERROR message in the log.
//! - [`InvariantViolation`] is fatal. It means an entity strategy broke the
//!   engine's contract. It is never returned; [`violation`] panics with it.

use thiserror::Error;

/// Recoverable, per-item patch failure.
///
/// Entity strategies return these from their hooks; the engine logs them
/// under the current item prefix and carries on with the next item.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PatchError {
    /// The identity a patch wants to act on is not in the source set.
    #[error("target not found")]
    TargetNotFound { target: String },

    /// Another patch action already consumed this identity.
    #[error("already targeted")]
    AlreadyTargeted { target: String },

    /// Any other problem an entity strategy detects in a patch.
    #[error("{0}")]
    Invalid(String),
}

impl PatchError {
    /// Create a strategy-specific patch error from a message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    /// The identity this error concerns, if it is a targeting error.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::TargetNotFound { target } | Self::AlreadyTargeted { target } => Some(target),
            Self::Invalid(_) => None,
        }
    }
}

/// Convenience alias for entity strategy hook results.
pub type PatchResult<T> = Result<T, PatchError>;

/// Internal-consistency failure caused by a defective entity strategy.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// A targeted identity is not present in the source set.
    #[error("missing target '{id}'")]
    MissingTarget { id: String },

    /// A patched item does not identify as the key it was registered under.
    #[error("changed patched identity: registered as '{key}' but identifies as '{actual}'")]
    ChangedPatchedId { key: String, actual: String },

    /// The same identity was registered as patched twice in one merge.
    #[error("colliding patched identity '{id}'")]
    CollidingPatchedId { id: String },
}

/// Abort the current merge on a broken invariant.
#[track_caller]
pub(crate) fn violation(v: InvariantViolation) -> ! {
    panic!("merge invariant violated: {v}")
}

/// Errors that can occur while loading engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration text could not be parsed.
    #[error("invalid merge config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targeting_errors_keep_plain_messages() {
        let e = PatchError::TargetNotFound {
            target: "Lfoo;".into(),
        };
        assert_eq!(e.to_string(), "target not found");
        assert_eq!(e.target(), Some("Lfoo;"));

        let e = PatchError::AlreadyTargeted {
            target: "Lfoo;".into(),
        };
        assert_eq!(e.to_string(), "already targeted");
    }

    #[test]
    fn msg_builds_invalid() {
        let e = PatchError::msg("cannot edit an interface");
        assert_eq!(e, PatchError::Invalid("cannot edit an interface".into()));
        assert_eq!(e.target(), None);
    }

    #[test]
    #[should_panic(expected = "missing target 'x'")]
    fn violation_panics_with_description() {
        violation(InvariantViolation::MissingTarget { id: "x".into() });
    }
}
