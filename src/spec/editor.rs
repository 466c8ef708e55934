use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::capture::controller::ElementPicked;
use crate::error::BuilderError;
use crate::spec::spec_model::{
    Action, ActionKind, Assertion, AssertionKind, Condition, SpecMeta, TestSpec,
};

/// Stable reference to an action row. Survives removal of other rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionHandle(u64);

/// Stable reference to an assertion row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssertionHandle(u64);

impl fmt::Display for ActionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action#{}", self.0)
    }
}

impl fmt::Display for AssertionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "assertion#{}", self.0)
    }
}

/// A single field change on an action row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ActionEdit {
    Kind(ActionKind),
    Page(String),
    /// Same storage as `Page`; the panel shows one page input for every kind
    TargetPage(String),
    Element(String),
    Value(String),
}

/// A single field change on an assertion row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum AssertionEdit {
    Kind(AssertionKind),
    Value(String),
    Condition(Condition),
}

/// The live, editable test description behind one open panel.
///
/// Rows are kept in append order; removing a row closes the gap so positions
/// stay contiguous. No field is validated here: defaults are applied by the
/// serializer, not at storage time.
#[derive(Debug, Default)]
pub struct SpecModel {
    meta: SpecMeta,
    actions: Vec<(ActionHandle, Action)>,
    assertions: Vec<(AssertionHandle, Assertion)>,
    next_handle: u64,
}

impl SpecModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn meta(&self) -> &SpecMeta {
        &self.meta
    }

    pub fn set_meta(&mut self, meta: SpecMeta) {
        debug!(test_id = %meta.test_id, data_driven = meta.data_driven, "metadata updated");
        self.meta = meta;
    }

    /// Append a new action. Kind always starts as `Navigate`; a pick seeds
    /// the page and element fields.
    pub fn add_action(&mut self, seed: Option<&ElementPicked>) -> ActionHandle {
        let handle = ActionHandle(self.allocate());
        let action = match seed {
            Some(picked) => Action {
                kind: ActionKind::Navigate,
                page: picked.page_id.clone(),
                element: picked.element_id.clone(),
                value: String::new(),
            },
            None => Action::default(),
        };
        debug!(%handle, position = self.actions.len(), seeded = seed.is_some(), "action added");
        self.actions.push((handle, action));
        handle
    }

    pub fn add_assertion(&mut self) -> AssertionHandle {
        let handle = AssertionHandle(self.allocate());
        debug!(%handle, position = self.assertions.len(), "assertion added");
        self.assertions.push((handle, Assertion::default()));
        handle
    }

    pub fn edit_action(&mut self, handle: ActionHandle, edit: ActionEdit) -> Result<(), BuilderError> {
        let action = self
            .actions
            .iter_mut()
            .find(|(h, _)| *h == handle)
            .map(|(_, a)| a)
            .ok_or(BuilderError::UnknownHandle {
                kind: "action",
                handle: handle.0,
            })?;

        match edit {
            ActionEdit::Kind(kind) => action.kind = kind,
            ActionEdit::Page(page) | ActionEdit::TargetPage(page) => action.page = page,
            ActionEdit::Element(element) => action.element = element,
            ActionEdit::Value(value) => action.value = value,
        }
        Ok(())
    }

    pub fn edit_assertion(
        &mut self,
        handle: AssertionHandle,
        edit: AssertionEdit,
    ) -> Result<(), BuilderError> {
        let assertion = self
            .assertions
            .iter_mut()
            .find(|(h, _)| *h == handle)
            .map(|(_, a)| a)
            .ok_or(BuilderError::UnknownHandle {
                kind: "assertion",
                handle: handle.0,
            })?;

        match edit {
            AssertionEdit::Kind(kind) => assertion.kind = kind,
            AssertionEdit::Value(value) => assertion.value = value,
            AssertionEdit::Condition(condition) => assertion.condition = condition,
        }
        Ok(())
    }

    /// Remove an action, returning it. Later rows shift down one position.
    pub fn remove_action(&mut self, handle: ActionHandle) -> Result<Action, BuilderError> {
        let pos = self
            .actions
            .iter()
            .position(|(h, _)| *h == handle)
            .ok_or(BuilderError::UnknownHandle {
                kind: "action",
                handle: handle.0,
            })?;
        debug!(%handle, position = pos, "action removed");
        Ok(self.actions.remove(pos).1)
    }

    pub fn remove_assertion(&mut self, handle: AssertionHandle) -> Result<Assertion, BuilderError> {
        let pos = self
            .assertions
            .iter()
            .position(|(h, _)| *h == handle)
            .ok_or(BuilderError::UnknownHandle {
                kind: "assertion",
                handle: handle.0,
            })?;
        debug!(%handle, position = pos, "assertion removed");
        Ok(self.assertions.remove(pos).1)
    }

    pub fn action(&self, handle: ActionHandle) -> Option<&Action> {
        self.actions.iter().find(|(h, _)| *h == handle).map(|(_, a)| a)
    }

    pub fn assertion(&self, handle: AssertionHandle) -> Option<&Assertion> {
        self.assertions.iter().find(|(h, _)| *h == handle).map(|(_, a)| a)
    }

    /// Handle of the action currently at `index`.
    pub fn action_at(&self, index: usize) -> Option<ActionHandle> {
        self.actions.get(index).map(|(h, _)| *h)
    }

    pub fn assertion_at(&self, index: usize) -> Option<AssertionHandle> {
        self.assertions.get(index).map(|(h, _)| *h)
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub fn assertion_count(&self) -> usize {
        self.assertions.len()
    }

    /// Owned copy of the whole spec. Later edits to the model do not reach it.
    pub fn snapshot(&self) -> TestSpec {
        TestSpec {
            test_id: self.meta.test_id.clone(),
            description: self.meta.description.clone(),
            data_file: if self.meta.data_driven {
                self.meta.data_file.clone()
            } else {
                String::new()
            },
            start_page: self.meta.start_page.clone(),
            actions: self.actions.iter().map(|(_, a)| a.clone()).collect(),
            assertions: self.assertions.iter().map(|(_, a)| a.clone()).collect(),
        }
    }

    fn allocate(&mut self) -> u64 {
        let id = self.next_handle;
        self.next_handle += 1;
        id
    }
}
