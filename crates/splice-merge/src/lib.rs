//! Merge engine for the Splice patcher.
//!
//! Reconciles a source collection of identifiable entities (types, fields,
//! methods, ...) with a collection of patch declarations, producing the
//! merged collection that gets written back out. The engine is generic over
//! the entity kind; everything kind-specific lives in an
//! [`EntityStrategy`].
//!
//! # Guarantees
//!
//! - Every source identity is consumed by at most one patch action.
//! - Output order is stable: untouched and replaced items keep their source
//!   position, additions are appended in registration order.
//! - A bad patch item is reported through the [`Logger`](splice_log::Logger)
//!   and skipped; it never aborts the merge.
//! - A strategy that breaks the engine's contract panics with an
//!   [`InvariantViolation`] description instead of producing a silently
//!   wrong result.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use splice_log::MemoryLogger;
//! use splice_merge::{EntityStrategy, MergeEngine, MergeScope, PatchResult};
//!
//! /// Patches name the items they add; a leading '-' removes instead.
//! struct Names;
//!
//! impl EntityStrategy<String> for Names {
//!     fn identify(&self, item: &String) -> String {
//!         item.trim_start_matches('-').to_string()
//!     }
//!
//!     fn on_patch<'p>(
//!         &self,
//!         scope: &mut MergeScope<'_, 'p, String>,
//!         id: &str,
//!         patch: &'p String,
//!     ) -> PatchResult<()> {
//!         if patch.starts_with('-') {
//!             scope.find_target(id, false)?;
//!         } else {
//!             scope.add_patched(id, patch, patch.clone());
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut engine = MergeEngine::new(Names, Arc::new(MemoryLogger::new()));
//! let source = vec!["a".to_string(), "b".to_string()];
//! let patches = vec!["-a".to_string(), "c".to_string()];
//! assert_eq!(engine.process(source, &patches), vec!["b", "c"]);
//! ```

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod flags;
pub mod pair;
pub mod prefix;
pub mod scope;
pub mod slots;
pub mod strategy;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience.
pub use config::MergeConfig;
pub use context::LogContext;
pub use engine::{MergeEngine, MergeStats};
pub use error::{ConfigError, InvariantViolation, PatchError, PatchResult};
pub use flags::{access, changed_flags, flag_diagnostics, Flag};
pub use pair::PatchedPair;
pub use prefix::LogPrefix;
pub use scope::MergeScope;
pub use slots::OrderedSlots;
pub use strategy::{EntityStrategy, Replacement};
