//! The merge engine: four passes from `(source, patches)` to the merged
//! sequence.
//!
//! 1. **Index source.** Every source item is keyed by identity in
//!    first-seen order. Duplicates are reported; the later value takes the
//!    earlier position.
//! 2. **Apply patches.** Each patch item goes to the strategy's `on_patch`,
//!    which claims targets and registers results through [`MergeScope`].
//! 3. **Resolve targets.** A claimed identity without a result is removed.
//!    One with a result has its slot emptied in place, pinning the position,
//!    and the strategy gets to inspect the replacement.
//! 4. **Commit results.** Results are stored in registration order; an
//!    identity nobody claimed but that already holds a value is reported and
//!    overwritten.
//!
//! Untouched and replaced items keep their source positions. Additions are
//! appended in registration order. Removed items disappear.

use std::fmt;
use std::sync::Arc;

use splice_log::{Level, Logger};
use tracing::debug;

use crate::config::MergeConfig;
use crate::context::LogContext;
use crate::error::{violation, InvariantViolation};
use crate::scope::MergeScope;
use crate::strategy::{EntityStrategy, Replacement};

/// Counts describing what one merge did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Items read from the source sequence, duplicates included.
    pub source_items: usize,
    /// Patch items processed.
    pub patch_items: usize,
    /// Source items removed.
    pub removed: usize,
    /// Source items replaced in place (renamed targets count as removed).
    pub replaced: usize,
    /// New identities appended to the output.
    pub added: usize,
    /// Recoverable errors reported.
    pub errors: usize,
}

/// Merges patch declarations into a source collection of one entity kind.
///
/// The engine owns its [`EntityStrategy`] and a shared [`Logger`]. It keeps
/// no state between calls: everything a merge needs lives in a
/// [`MergeScope`] created and dropped inside [`MergeEngine::process`].
///
/// Recoverable problems never surface as return values; they are logged
/// with the prefix of the item they concern. A broken engine invariant
/// (see [`InvariantViolation`]) panics.
pub struct MergeEngine<S> {
    strategy: S,
    logger: Arc<dyn Logger>,
    base_prefix: String,
    config: MergeConfig,
}

impl<S: fmt::Debug> fmt::Debug for MergeEngine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergeEngine")
            .field("strategy", &self.strategy)
            .field("base_prefix", &self.base_prefix)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<S> MergeEngine<S> {
    /// Create an engine with the default configuration.
    pub fn new(strategy: S, logger: Arc<dyn Logger>) -> Self {
        Self::with_config(strategy, logger, MergeConfig::default())
    }

    pub fn with_config(strategy: S, logger: Arc<dyn Logger>, config: MergeConfig) -> Self {
        Self {
            strategy,
            logger,
            base_prefix: String::new(),
            config,
        }
    }

    /// Create an engine for the parts of the item `parent` currently
    /// describes, e.g. the members of a class being patched.
    ///
    /// The child shares the parent's logger and prefixes all its messages
    /// with the parent's current prefix. It does not inherit the parent
    /// engine's size hints and starts from [`MergeConfig::default`].
    pub fn nested(parent: &LogContext, strategy: S) -> Self {
        Self {
            strategy,
            logger: Arc::clone(parent.logger()),
            base_prefix: parent.prefix().to_string(),
            config: MergeConfig::default(),
        }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Merge `patches` into `source` using the configured size hints.
    pub fn process<'p, T, I, P>(&mut self, source: I, patches: P) -> Vec<T>
    where
        S: EntityStrategy<T>,
        T: 'p,
        I: IntoIterator<Item = T>,
        P: IntoIterator<Item = &'p T>,
    {
        let source_hint = self.config.source_size_hint;
        let patch_hint = self.config.patch_size_hint;
        self.process_with_hints(source, source_hint, patches, patch_hint)
    }

    /// Merge `patches` into `source`, pre-sizing the working maps.
    pub fn process_with_hints<'p, T, I, P>(
        &mut self,
        source: I,
        source_hint: usize,
        patches: P,
        patch_hint: usize,
    ) -> Vec<T>
    where
        S: EntityStrategy<T>,
        T: 'p,
        I: IntoIterator<Item = T>,
        P: IntoIterator<Item = &'p T>,
    {
        self.process_report(source, source_hint, patches, patch_hint).0
    }

    /// Merge `patches` into `source` and report what happened.
    ///
    /// # Panics
    ///
    /// If the strategy breaks an engine invariant: claiming an identity
    /// that is not in the source set and then leaving it without a
    /// replacement, or registering a result under the wrong identity or
    /// twice.
    pub fn process_report<'p, T, I, P>(
        &mut self,
        source: I,
        source_hint: usize,
        patches: P,
        patch_hint: usize,
    ) -> (Vec<T>, MergeStats)
    where
        S: EntityStrategy<T>,
        T: 'p,
        I: IntoIterator<Item = T>,
        P: IntoIterator<Item = &'p T>,
    {
        let strategy = &self.strategy;
        let identify = |item: &T| strategy.identify(item);
        let log = LogContext::new(Arc::clone(&self.logger), self.base_prefix.clone());
        let mut scope = MergeScope::new(&identify, log, source_hint, patch_hint);
        let mut stats = MergeStats::default();

        // Pass 1: index source.
        for item in source {
            stats.source_items += 1;
            let id = strategy.identify(&item);
            if scope.source.insert(id.clone(), item).is_some() {
                scope.log.set_prefix(&strategy.describe(&id, None, None));
                scope.log(Level::Error, "duplicate found in source");
                stats.errors += 1;
            }
        }

        // Pass 2: apply patches.
        for patch in patches {
            stats.patch_items += 1;
            let id = strategy.identify(patch);
            scope.log.set_prefix(&strategy.describe(&id, Some(patch), None));
            if let Err(e) = strategy.on_patch(&mut scope, &id, patch) {
                scope.log(Level::Error, &e.to_string());
                stats.errors += 1;
            }
        }

        let (mut source_map, targeted, patched, mut log) = scope.into_parts();

        // Pass 3: resolve targets.
        for (id, &in_place_edit) in targeted.iter() {
            match patched.get(id) {
                None => {
                    if source_map.remove(id).is_none() {
                        violation(InvariantViolation::MissingTarget { id: id.to_string() });
                    }
                    stats.removed += 1;
                }
                Some(pair) => {
                    // Keep the position; the patched value lands here in pass 4.
                    let Some(original) = source_map.reserve(id) else {
                        violation(InvariantViolation::MissingTarget { id: id.to_string() });
                    };
                    log.set_prefix(&strategy.describe(id, Some(pair.patch), Some(&pair.patched)));
                    let replacement = Replacement {
                        id,
                        patch: pair.patch,
                        patched: &pair.patched,
                        original: &original,
                        in_place_edit,
                    };
                    if let Err(e) = strategy.on_effective_replacement(&mut log, &replacement) {
                        log.log(Level::Error, &e.to_string());
                        stats.errors += 1;
                    }
                    stats.replaced += 1;
                }
            }
        }

        // Pass 4: commit patched values.
        for (id, pair) in patched.into_entries() {
            if source_map.get(&id).is_some() {
                log.set_prefix(&strategy.describe(&id, Some(pair.patch), Some(&pair.patched)));
                log.log(Level::Error, "already exists");
                stats.errors += 1;
            } else if !source_map.contains(&id) {
                stats.added += 1;
            }
            source_map.insert(id, pair.patched);
        }

        let merged = source_map.into_values();
        debug!(
            prefix = %self.base_prefix,
            source = stats.source_items,
            patches = stats.patch_items,
            removed = stats.removed,
            replaced = stats.replaced,
            added = stats.added,
            errors = stats.errors,
            merged = merged.len(),
            "merge complete"
        );
        (merged, stats)
    }
}

#[cfg(test)]
mod tests {
    use splice_log::MemoryLogger;

    use super::*;
    use crate::error::PatchResult;
    use crate::testing::{entity, ids, patch, Action, Entity, ScriptStrategy};

    fn engine(logger: &Arc<MemoryLogger>) -> MergeEngine<ScriptStrategy> {
        MergeEngine::new(ScriptStrategy::default(), logger.clone())
    }

    #[test]
    fn stats_count_each_kind_of_action() {
        let logger = Arc::new(MemoryLogger::new());
        let source = vec![entity("a", 1), entity("b", 2), entity("c", 3)];
        let patches = vec![
            patch("a", 10, Action::Edit),
            patch("b", 0, Action::Remove),
            patch("d", 4, Action::Add),
            patch("zz", 0, Action::Remove),
        ];

        let (merged, stats) = engine(&logger).process_report(source, 3, &patches, 4);

        assert_eq!(ids(&merged), vec!["a", "c", "d"]);
        assert_eq!(
            stats,
            MergeStats {
                source_items: 3,
                patch_items: 4,
                removed: 1,
                replaced: 1,
                added: 1,
                errors: 1,
            }
        );
    }

    #[test]
    fn replacement_hook_error_keeps_replacement() {
        let logger = Arc::new(MemoryLogger::new());
        let mut engine = MergeEngine::new(ScriptStrategy::vetoing("a"), logger.clone());
        let patches = vec![patch("a", 9, Action::Edit)];

        let merged = engine.process(vec![entity("a", 1), entity("b", 2)], &patches);

        assert_eq!(merged, vec![entity("a", 9), entity("b", 2)]);
        assert_eq!(
            logger.messages(Level::Error),
            vec!["entity 'a': replacement vetoed"]
        );
    }

    #[test]
    fn replacement_hook_sees_original_and_flag_changes() {
        let logger = Arc::new(MemoryLogger::new());
        let source = vec![entity("a", 1).with_flags(0x1 | 0x10)];
        let patches = vec![patch("a", 2, Action::Edit).with_flags(0x1)];

        let merged = engine(&logger).process(source, &patches);

        assert_eq!(merged[0].flags, 0x1);
        assert_eq!(
            logger.messages(Level::Warn),
            vec!["entity 'a': 'final' modifier changed"]
        );
    }

    #[test]
    fn replacement_hook_receives_in_place_flag_in_targeting_order() {
        let logger = Arc::new(MemoryLogger::new());
        let source = vec![entity("a", 1), entity("b", 2)];
        let patches = vec![
            patch(
                "b",
                0,
                Action::Claim {
                    target: "b".into(),
                    in_place: false,
                },
            ),
            patch("b", 5, Action::Add),
            patch("a", 9, Action::Edit),
        ];
        let mut engine = engine(&logger);

        let (merged, stats) = engine.process_report(source, 2, &patches, 3);

        assert_eq!(
            engine.strategy().replacements(),
            vec![("b".to_string(), false), ("a".to_string(), true)]
        );
        assert_eq!(merged, vec![entity("a", 9), entity("b", 5)]);
        assert_eq!(stats.replaced, 2);
        assert!(logger.records().is_empty());
    }

    #[test]
    fn rename_via_replace_removes_target_and_appends_result() {
        let logger = Arc::new(MemoryLogger::new());
        let source = vec![entity("a", 1), entity("b", 2)];
        let patches = vec![patch(
            "z",
            5,
            Action::Replace {
                target: "a".into(),
            },
        )];

        let (merged, stats) = engine(&logger).process_report(source, 2, &patches, 1);

        assert_eq!(ids(&merged), vec!["b", "z"]);
        assert_eq!(stats.removed, 1);
        assert_eq!(stats.added, 1);
        assert!(logger.records().is_empty());
    }

    #[test]
    fn size_hints_do_not_change_the_result() {
        let logger = Arc::new(MemoryLogger::new());
        let patches = vec![patch("c", 3, Action::Add)];
        let small = engine(&logger).process_with_hints(vec![entity("a", 1)], 0, &patches, 0);
        let large = engine(&logger).process_with_hints(vec![entity("a", 1)], 1024, &patches, 1024);
        assert_eq!(small, large);
    }

    // Members of a container, patched by a child engine.
    #[derive(Clone, Debug, PartialEq, Eq)]
    struct Container {
        id: String,
        members: Vec<Entity>,
        member_patches: Vec<Entity>,
    }

    struct ContainerStrategy;

    impl EntityStrategy<Container> for ContainerStrategy {
        fn identify(&self, item: &Container) -> String {
            item.id.clone()
        }

        fn describe(&self, id: &str, _: Option<&Container>, _: Option<&Container>) -> String {
            format!("type '{id}'")
        }

        fn on_patch<'p>(
            &self,
            scope: &mut MergeScope<'_, 'p, Container>,
            id: &str,
            patch: &'p Container,
        ) -> PatchResult<()> {
            let original = scope.find_target(id, true)?.clone();
            let mut members = MergeEngine::nested(scope.log_context(), ScriptStrategy::default());
            let merged = members.process(original.members, &patch.member_patches);
            scope.add_patched(
                id,
                patch,
                Container {
                    id: id.to_string(),
                    members: merged,
                    member_patches: Vec::new(),
                },
            );
            Ok(())
        }
    }

    #[test]
    fn nested_engine_prefixes_with_parent_item() {
        let logger = Arc::new(MemoryLogger::new());
        let source = vec![Container {
            id: "Lfoo;".into(),
            members: vec![entity("x", 1), entity("y", 2)],
            member_patches: Vec::new(),
        }];
        let patches = vec![Container {
            id: "Lfoo;".into(),
            members: Vec::new(),
            member_patches: vec![
                patch("y", 0, Action::Remove),
                patch("nope", 0, Action::Edit),
            ],
        }];

        let mut engine = MergeEngine::new(ContainerStrategy, logger.clone());
        let merged = engine.process(source, &patches);

        assert_eq!(merged.len(), 1);
        assert_eq!(ids(&merged[0].members), vec!["x"]);
        assert_eq!(
            logger.messages(Level::Error),
            vec!["type 'Lfoo;': entity 'nope': target not found"]
        );
    }

    #[test]
    fn nested_engine_inherits_logger_and_prefix() {
        let logger = Arc::new(MemoryLogger::new());
        let mut parent = LogContext::new(logger.clone(), "");
        parent.set_prefix("type 'Lbar;'");
        let child: MergeEngine<ScriptStrategy> =
            MergeEngine::nested(&parent, ScriptStrategy::default());
        assert_eq!(child.base_prefix, "type 'Lbar;': ");
        assert_eq!(child.config(), &MergeConfig::default());
    }

    #[test]
    fn strategy_errors_are_logged_verbatim() {
        let logger = Arc::new(MemoryLogger::new());
        let patches = vec![patch("q", 0, Action::Fail("bad annotation".into()))];
        let merged = engine(&logger).process(Vec::<Entity>::new(), &patches);
        assert!(merged.is_empty());
        assert_eq!(
            logger.messages(Level::Error),
            vec!["entity 'q': bad annotation"]
        );
    }
}
