//! The [`EntityStrategy`] trait: everything the engine needs to know about
//! one kind of entity.

use crate::context::LogContext;
use crate::error::PatchResult;
use crate::scope::MergeScope;

/// A replacement staged during target resolution, handed to
/// [`EntityStrategy::on_effective_replacement`].
#[derive(Clone, Copy, Debug)]
pub struct Replacement<'a, T> {
    /// Identity shared by the original and the patched entity.
    pub id: &'a str,
    /// The patch declaration that produced `patched`.
    pub patch: &'a T,
    /// The entity taking the original's position.
    pub patched: &'a T,
    /// The source entity being replaced.
    pub original: &'a T,
    /// Whether the target was marked as edited in place.
    pub in_place_edit: bool,
}

/// Per-entity-kind behavior plugged into a [`MergeEngine`].
///
/// Implement this once per entity kind (types, fields, methods, ...). The
/// engine owns the strategy and calls back into it while merging; the
/// strategy in turn expresses each patch action through the targeting
/// primitives on [`MergeScope`].
///
/// Hooks take `&self`: all per-merge state lives in the scope, never in the
/// strategy.
///
/// [`MergeEngine`]: crate::engine::MergeEngine
pub trait EntityStrategy<T> {
    /// The stable identity of `item`.
    fn identify(&self, item: &T) -> String;

    /// Human-readable prefix component for messages about `id`.
    ///
    /// `patch` is set while the item is being patched, and `patched` once
    /// a result exists for it.
    fn describe(&self, id: &str, patch: Option<&T>, patched: Option<&T>) -> String {
        let _ = (patch, patched);
        id.to_string()
    }

    /// Apply one patch item.
    ///
    /// Expresses an addition (`add_patched` only), a removal (`add_target`
    /// only), a replacement or an in-place edit (target plus
    /// `add_patched`). Errors are logged against this item and the merge
    /// moves on to the next one.
    fn on_patch<'p>(
        &self,
        scope: &mut MergeScope<'_, 'p, T>,
        id: &str,
        patch: &'p T,
    ) -> PatchResult<()>;

    /// Inspect a replacement after it has been staged.
    ///
    /// Typical use is cross-checking the original against the patched
    /// entity and warning about modifier changes. Returning an error logs
    /// it; the replacement stays in place.
    fn on_effective_replacement(
        &self,
        log: &mut LogContext,
        replacement: &Replacement<'_, T>,
    ) -> PatchResult<()> {
        let _ = (log, replacement);
        Ok(())
    }
}
