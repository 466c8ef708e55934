use std::fmt;

use serde::{Deserialize, Serialize};

/// A complete test description, ready for serialization. Produced by
/// `SpecModel::snapshot` or deserialized from YAML/JSON for offline rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TestSpec {
    /// Identifier used as the property namespace (`test.<test_id>.*`)
    #[serde(default)]
    pub test_id: String,

    #[serde(default)]
    pub description: String,

    /// Data file for data-driven tests, empty when not data-driven
    #[serde(default)]
    pub data_file: String,

    /// Page the runner opens before the first action
    #[serde(default)]
    pub start_page: String,

    /// Actions in execution order
    #[serde(default)]
    pub actions: Vec<Action>,

    /// Assertions in evaluation order
    #[serde(default)]
    pub assertions: Vec<Assertion>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    #[default]
    Navigate,
    Enter,
    Click,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Navigate => "navigate",
            ActionKind::Enter => "enter",
            ActionKind::Click => "click",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One user-interaction step as edited in the panel.
///
/// The record keeps every field the user typed regardless of `kind`, so
/// switching kind back and forth never loses input. A `Navigate` action takes
/// its target page from `page`; `element` and `value` only matter for
/// `Enter`/`Click`. Use [`Action::step`] for the kind-specific view.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Action {
    #[serde(default)]
    pub kind: ActionKind,

    #[serde(default)]
    pub page: String,

    /// Element locator token (element id, or tag name when the element had none)
    #[serde(default)]
    pub element: String,

    #[serde(default)]
    pub value: String,
}

/// Kind-specific view of an [`Action`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionStep<'a> {
    Navigate {
        target_page: &'a str,
    },
    Enter {
        page: &'a str,
        element: &'a str,
        value: &'a str,
    },
    Click {
        page: &'a str,
        element: &'a str,
        value: &'a str,
    },
}

impl Action {
    pub fn navigate(target_page: impl Into<String>) -> Self {
        Action {
            kind: ActionKind::Navigate,
            page: target_page.into(),
            ..Action::default()
        }
    }

    pub fn enter(page: impl Into<String>, element: impl Into<String>, value: impl Into<String>) -> Self {
        Action {
            kind: ActionKind::Enter,
            page: page.into(),
            element: element.into(),
            value: value.into(),
        }
    }

    pub fn click(page: impl Into<String>, element: impl Into<String>) -> Self {
        Action {
            kind: ActionKind::Click,
            page: page.into(),
            element: element.into(),
            value: String::new(),
        }
    }

    pub fn step(&self) -> ActionStep<'_> {
        match self.kind {
            ActionKind::Navigate => ActionStep::Navigate {
                target_page: &self.page,
            },
            ActionKind::Enter => ActionStep::Enter {
                page: &self.page,
                element: &self.element,
                value: &self.value,
            },
            ActionKind::Click => ActionStep::Click {
                page: &self.page,
                element: &self.element,
                value: &self.value,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AssertionKind {
    #[default]
    Url,
    Visible,
}

impl AssertionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssertionKind::Url => "url",
            AssertionKind::Visible => "visible",
        }
    }
}

impl fmt::Display for AssertionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    #[default]
    Equals,
    Contains,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Equals => "equals",
            Condition::Contains => "contains",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A post-condition the runner checks after the actions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Assertion {
    #[serde(default, rename = "type")]
    pub kind: AssertionKind,

    #[serde(default)]
    pub value: String,

    #[serde(default)]
    pub condition: Condition,
}

impl Assertion {
    pub fn new(kind: AssertionKind, value: impl Into<String>, condition: Condition) -> Self {
        Assertion {
            kind,
            value: value.into(),
            condition,
        }
    }
}

/// Scalar fields of the panel, stored exactly as the user typed them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SpecMeta {
    #[serde(default)]
    pub test_id: String,

    #[serde(default)]
    pub description: String,

    /// Advisory: the data file only reaches the snapshot while this is set
    #[serde(default)]
    pub data_driven: bool,

    #[serde(default)]
    pub data_file: String,

    #[serde(default)]
    pub start_page: String,
}
