//! Per-merge scratch state and the targeting primitives.
//!
//! A [`MergeScope`] is created at the start of every
//! [`MergeEngine::process`] call and dropped before it returns, on every
//! path. It owns the three working maps:
//!
//! - **source**: identity → source item, in first-seen order. It is also
//!   the container the output is assembled in.
//! - **targeted**: identity → in-place-edit flag, in first-target order.
//!   An identity can be targeted at most once per merge.
//! - **patched**: identity → [`PatchedPair`], in registration order.
//!
//! [`MergeEngine::process`]: crate::engine::MergeEngine::process

use splice_log::Level;

use crate::context::LogContext;
use crate::error::{violation, InvariantViolation, PatchError, PatchResult};
use crate::pair::PatchedPair;
use crate::slots::OrderedSlots;

/// Scratch state of one merge, handed to
/// [`EntityStrategy::on_patch`](crate::strategy::EntityStrategy::on_patch).
pub struct MergeScope<'s, 'p, T> {
    identify: &'s dyn Fn(&T) -> String,
    pub(crate) source: OrderedSlots<T>,
    pub(crate) targeted: OrderedSlots<bool>,
    pub(crate) patched: OrderedSlots<PatchedPair<'p, T>>,
    pub(crate) log: LogContext,
}

impl<'s, 'p, T> MergeScope<'s, 'p, T> {
    pub(crate) fn new(
        identify: &'s dyn Fn(&T) -> String,
        log: LogContext,
        source_hint: usize,
        patch_hint: usize,
    ) -> Self {
        Self {
            identify,
            source: OrderedSlots::with_capacity(source_hint + patch_hint),
            targeted: OrderedSlots::new(),
            patched: OrderedSlots::with_capacity(patch_hint),
            log,
        }
    }

    /// Split the scope once all patches are applied.
    #[allow(clippy::type_complexity)]
    pub(crate) fn into_parts(
        self,
    ) -> (
        OrderedSlots<T>,
        OrderedSlots<bool>,
        OrderedSlots<PatchedPair<'p, T>>,
        LogContext,
    ) {
        (self.source, self.targeted, self.patched, self.log)
    }

    // ---------------------------------------------------------------
    // Targeting primitives
    // ---------------------------------------------------------------

    /// Look up `id` in the source set and claim it as a target.
    ///
    /// Fails with [`PatchError::TargetNotFound`] if there is no such source
    /// item, or [`PatchError::AlreadyTargeted`] if another patch action
    /// already claimed it. On success the returned item is the basis for
    /// the caller's edit.
    pub fn find_target(&mut self, id: &str, in_place_edit: bool) -> PatchResult<&T> {
        let Some(target) = self.source.get(id) else {
            return Err(PatchError::TargetNotFound {
                target: id.to_string(),
            });
        };
        claim(&mut self.targeted, id, in_place_edit)?;
        Ok(target)
    }

    /// Claim `id` as consumed by the current patch action.
    ///
    /// A second claim on the same identity fails with
    /// [`PatchError::AlreadyTargeted`] and leaves the first claim, including
    /// its in-place-edit flag, untouched. The identity is not checked
    /// against the source set here; a removal of an unknown identity is a
    /// strategy defect caught when targets are resolved.
    pub fn add_target(&mut self, id: &str, in_place_edit: bool) -> PatchResult<()> {
        claim(&mut self.targeted, id, in_place_edit)
    }

    /// Register `patched` as the result of `patch` under `id`.
    ///
    /// # Panics
    ///
    /// If `patched` does not identify as `id`, or if `id` was already
    /// registered in this merge. Both are strategy defects, never a
    /// property of the patch data.
    pub fn add_patched(&mut self, id: &str, patch: &'p T, patched: T) {
        let actual = (self.identify)(&patched);
        if actual != id {
            violation(InvariantViolation::ChangedPatchedId {
                key: id.to_string(),
                actual,
            });
        }
        if self.patched.contains(id) {
            violation(InvariantViolation::CollidingPatchedId { id: id.to_string() });
        }
        self.patched
            .insert(id.to_string(), PatchedPair::new(patch, patched));
    }

    // ---------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------

    /// The source item for `id`, if any.
    pub fn source_item(&self, id: &str) -> Option<&T> {
        self.source.get(id)
    }

    /// Source identities in source order.
    pub fn source_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.source.ids()
    }

    /// Returns `true` if `id` was already claimed as a target.
    pub fn is_targeted(&self, id: &str) -> bool {
        self.targeted.contains(id)
    }

    /// Returns `true` if a result was already registered under `id`.
    pub fn is_patched(&self, id: &str) -> bool {
        self.patched.contains(id)
    }

    // ---------------------------------------------------------------
    // Logging
    // ---------------------------------------------------------------

    /// Log `message` under the current item prefix.
    pub fn log(&self, level: Level, message: &str) {
        self.log.log(level, message);
    }

    pub fn is_logging(&self, level: Level) -> bool {
        self.log.is_logging(level)
    }

    /// Narrow the prefix to a sub-part of the current patch item.
    pub fn extend_prefix(&mut self, component: &str) {
        self.log.extend_prefix(component);
    }

    /// The logging context, e.g. to build a nested engine.
    pub fn log_context(&self) -> &LogContext {
        &self.log
    }

    pub fn log_context_mut(&mut self) -> &mut LogContext {
        &mut self.log
    }
}

fn claim(targeted: &mut OrderedSlots<bool>, id: &str, in_place_edit: bool) -> PatchResult<()> {
    if targeted.contains(id) {
        return Err(PatchError::AlreadyTargeted {
            target: id.to_string(),
        });
    }
    targeted.insert(id.to_string(), in_place_edit);
    Ok(())
}
