//! Scripted entity kind shared by the crate's tests.
//!
//! Each patch entity carries the action it wants performed, so tests can
//! spell out a merge as plain data.

use std::sync::{Mutex, PoisonError};

use crate::context::LogContext;
use crate::error::{PatchError, PatchResult};
use crate::flags::access;
use crate::scope::MergeScope;
use crate::strategy::{EntityStrategy, Replacement};
use splice_log::Level;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    /// Plain source entity, or the result of a patch.
    Keep,
    /// Add the patch as a new entity.
    Add,
    /// Remove the entity with the patch's identity.
    Remove,
    /// Edit the entity with the patch's identity in place, taking the
    /// patch's value and flags.
    Edit,
    /// Remove `target` and add the patch under its own identity.
    Replace { target: String },
    /// Claim `target` without checking the source set.
    Claim { target: String, in_place: bool },
    /// Register a result that identifies as `to`.
    Rename { to: String },
    /// Fail with the given message.
    Fail(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Entity {
    pub id: String,
    pub value: u32,
    pub flags: u32,
    pub action: Action,
}

impl Entity {
    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    /// The entity as it lands in the output.
    pub fn result(&self) -> Self {
        Self {
            action: Action::Keep,
            ..self.clone()
        }
    }
}

pub(crate) fn entity(id: &str, value: u32) -> Entity {
    Entity {
        id: id.to_string(),
        value,
        flags: 0,
        action: Action::Keep,
    }
}

pub(crate) fn patch(id: &str, value: u32, action: Action) -> Entity {
    Entity {
        action,
        ..entity(id, value)
    }
}

pub(crate) fn ids(items: &[Entity]) -> Vec<&str> {
    items.iter().map(|e| e.id.as_str()).collect()
}

#[derive(Debug, Default)]
pub(crate) struct ScriptStrategy {
    /// Identity whose effective replacement is rejected.
    pub veto: Option<String>,
    /// `(id, in_place_edit)` of every replacement the hook saw, in order.
    pub seen: Mutex<Vec<(String, bool)>>,
}

impl ScriptStrategy {
    pub fn vetoing(id: &str) -> Self {
        Self {
            veto: Some(id.to_string()),
            ..Self::default()
        }
    }

    pub fn replacements(&self) -> Vec<(String, bool)> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl EntityStrategy<Entity> for ScriptStrategy {
    fn identify(&self, item: &Entity) -> String {
        item.id.clone()
    }

    fn describe(&self, id: &str, _patch: Option<&Entity>, _patched: Option<&Entity>) -> String {
        format!("entity '{id}'")
    }

    fn on_patch<'p>(
        &self,
        scope: &mut MergeScope<'_, 'p, Entity>,
        id: &str,
        patch: &'p Entity,
    ) -> PatchResult<()> {
        match &patch.action {
            Action::Keep | Action::Add => scope.add_patched(id, patch, patch.result()),
            Action::Remove => {
                scope.find_target(id, false)?;
            }
            Action::Edit => {
                let original = scope.find_target(id, true)?;
                let edited = Entity {
                    value: patch.value,
                    flags: patch.flags,
                    ..original.result()
                };
                scope.add_patched(id, patch, edited);
            }
            Action::Replace { target } => {
                scope.find_target(target, false)?;
                scope.add_patched(id, patch, patch.result());
            }
            Action::Claim { target, in_place } => scope.add_target(target, *in_place)?,
            Action::Rename { to } => scope.add_patched(id, patch, entity(to, patch.value)),
            Action::Fail(message) => return Err(PatchError::msg(message.clone())),
        }
        Ok(())
    }

    fn on_effective_replacement(
        &self,
        log: &mut LogContext,
        replacement: &Replacement<'_, Entity>,
    ) -> PatchResult<()> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((replacement.id.to_string(), replacement.in_place_edit));
        log.check_flags(
            Level::Warn,
            replacement.original.flags,
            replacement.patched.flags,
            &access::CLASS,
            |flag| format!("'{}' modifier changed", flag.name),
        );
        if self.veto.as_deref() == Some(replacement.id) {
            return Err(PatchError::msg("replacement vetoed"));
        }
        Ok(())
    }
}
