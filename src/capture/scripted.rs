use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::capture::host::{Cursor, ElementIdentity, HostDocument, ListenerKind, NodeId};

/// An element of a scripted page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DomElement {
    pub tag: String,
    #[serde(default)]
    pub id: Option<String>,
}

/// Static description of the document a replay runs against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentSpec {
    /// Location path the document starts on
    #[serde(default = "default_path")]
    pub path: String,

    /// Whether the document body is ready for listeners and the panel
    #[serde(default = "default_true")]
    pub surface: bool,

    #[serde(default)]
    pub elements: Vec<DomElement>,
}

impl Default for DocumentSpec {
    fn default() -> Self {
        DocumentSpec {
            path: default_path(),
            surface: true,
            elements: Vec::new(),
        }
    }
}

fn default_path() -> String {
    "/".to_string()
}

fn default_true() -> bool {
    true
}

/// How a script addresses an element: by position or by id attribute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ElementRef {
    Index(usize),
    Id(String),
}

/// In-memory host document.
///
/// Keeps track of attached listeners, highlighted nodes and the cursor so the
/// capture state machine can be observed from outside.
#[derive(Debug, Clone)]
pub struct ScriptedDocument {
    pub path: String,
    pub surface: bool,
    pub elements: Vec<DomElement>,
    pub cursor: Cursor,
    listeners: HashMap<ListenerKind, usize>,
    highlighted: Vec<NodeId>,
    highlight_count: usize,
}

impl ScriptedDocument {
    pub fn new(spec: DocumentSpec) -> Self {
        ScriptedDocument {
            path: spec.path,
            surface: spec.surface,
            elements: spec.elements,
            cursor: Cursor::Default,
            listeners: HashMap::new(),
            highlighted: Vec::new(),
            highlight_count: 0,
        }
    }

    /// Convenience constructor: a ready document on `path` with the given elements.
    pub fn with_elements(path: &str, elements: Vec<DomElement>) -> Self {
        Self::new(DocumentSpec {
            path: path.to_string(),
            surface: true,
            elements,
        })
    }

    pub fn navigate(&mut self, path: &str) {
        self.path = path.to_string();
    }

    pub fn resolve(&self, element: &ElementRef) -> Option<NodeId> {
        match element {
            ElementRef::Index(i) if *i < self.elements.len() => Some(NodeId(*i)),
            ElementRef::Index(_) => None,
            ElementRef::Id(id) => self
                .elements
                .iter()
                .position(|el| el.id.as_deref() == Some(id.as_str()))
                .map(NodeId),
        }
    }

    /// Number of currently attached listeners of a kind.
    pub fn listener_count(&self, kind: ListenerKind) -> usize {
        self.listeners.get(&kind).copied().unwrap_or(0)
    }

    /// Nodes currently carrying the highlight outline.
    pub fn highlighted(&self) -> &[NodeId] {
        &self.highlighted
    }

    /// Total number of highlight operations applied so far.
    pub fn highlight_count(&self) -> usize {
        self.highlight_count
    }
}

impl HostDocument for ScriptedDocument {
    fn has_surface(&self) -> bool {
        self.surface
    }

    fn identify(&self, node: NodeId) -> Option<ElementIdentity> {
        self.elements.get(node.0).map(|el| ElementIdentity {
            id: el.id.clone(),
            tag: el.tag.clone(),
        })
    }

    fn current_path(&self) -> String {
        self.path.clone()
    }

    fn attach(&mut self, listener: ListenerKind) {
        *self.listeners.entry(listener).or_insert(0) += 1;
    }

    fn detach(&mut self, listener: ListenerKind) {
        if let Some(count) = self.listeners.get_mut(&listener) {
            *count = count.saturating_sub(1);
        }
    }

    fn highlight(&mut self, node: NodeId) {
        self.highlight_count += 1;
        if !self.highlighted.contains(&node) {
            self.highlighted.push(node);
        }
    }

    fn unhighlight(&mut self, node: NodeId) {
        self.highlighted.retain(|n| *n != node);
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }
}
