use serde::{Deserialize, Serialize};

/// Opaque reference to a node of the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// What the host can tell about a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementIdentity {
    /// Stable identifier attribute, if the node has one
    pub id: Option<String>,
    /// Structural tag name as the host reports it
    pub tag: String,
}

/// Listener groups the selection controller installs on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenerKind {
    /// Pointer movement (hover and leave)
    Hover,
    /// Pointer confirm (click)
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    Default,
    Crosshair,
}

/// Pointer events relayed from the host while listeners are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "node", rename_all = "snake_case")]
pub enum HostEvent {
    Hover(NodeId),
    Leave(NodeId),
    Confirm(NodeId),
}

impl HostEvent {
    pub fn node(&self) -> NodeId {
        match self {
            HostEvent::Hover(n) | HostEvent::Leave(n) | HostEvent::Confirm(n) => *n,
        }
    }

    pub fn listener(&self) -> ListenerKind {
        match self {
            HostEvent::Hover(_) | HostEvent::Leave(_) => ListenerKind::Hover,
            HostEvent::Confirm(_) => ListenerKind::Confirm,
        }
    }
}

/// Access to the live document the user is pointing at.
///
/// Injected into the selection controller so capture can be driven by
/// synthetic events instead of real pointer input.
pub trait HostDocument {
    /// Whether listeners and overlays can be attached right now
    fn has_surface(&self) -> bool;

    /// Identity of a node, `None` if the node is unknown to the host
    fn identify(&self, node: NodeId) -> Option<ElementIdentity>;

    /// Path component of the current location, e.g. `/shop/cart`
    fn current_path(&self) -> String;

    fn attach(&mut self, listener: ListenerKind);

    fn detach(&mut self, listener: ListenerKind);

    fn highlight(&mut self, node: NodeId);

    fn unhighlight(&mut self, node: NodeId);

    fn set_cursor(&mut self, cursor: Cursor);
}
