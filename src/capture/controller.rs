use serde::Serialize;
use tracing::{debug, info, warn};

use crate::capture::host::{Cursor, HostDocument, HostEvent, ListenerKind, NodeId};
use crate::error::BuilderError;

pub const UNKNOWN_PAGE: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Idle,
    Selecting { highlighted: Option<NodeId> },
}

/// Emitted once per capture when the user confirms a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementPicked {
    pub element_id: String,
    pub page_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// No listener for this event is attached; the host handles it normally
    Ignored,
    /// Intercepted; the host must suppress default activation and propagation
    Consumed,
    /// Intercepted, and the capture finished with this pick
    Picked(ElementPicked),
}

impl EventOutcome {
    pub fn suppresses_default(&self) -> bool {
        !matches!(self, EventOutcome::Ignored)
    }
}

/// Binary idle/selecting mode over the host document.
///
/// `begin` attaches hover and confirm listeners; the first confirm detaches
/// the confirm listener before doing anything else, so any further confirm
/// is ignored until the next `begin`.
#[derive(Debug)]
pub struct SelectionController {
    state: SelectionState,
    hover_attached: bool,
    confirm_attached: bool,
}

impl SelectionController {
    pub fn new() -> Self {
        SelectionController {
            state: SelectionState::Idle,
            hover_attached: false,
            confirm_attached: false,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self.state, SelectionState::Selecting { .. })
    }

    pub fn highlighted(&self) -> Option<NodeId> {
        match self.state {
            SelectionState::Selecting { highlighted } => highlighted,
            SelectionState::Idle => None,
        }
    }

    /// Enter selecting mode. A no-op while already selecting.
    pub fn begin(&mut self, host: &mut dyn HostDocument) -> Result<(), BuilderError> {
        if self.is_selecting() {
            debug!("begin ignored: capture already in progress");
            return Ok(());
        }

        if !host.has_surface() {
            warn!("cannot start element selection: host document has no surface");
            return Err(BuilderError::AttachmentUnavailable);
        }

        host.set_cursor(Cursor::Crosshair);
        host.attach(ListenerKind::Hover);
        host.attach(ListenerKind::Confirm);
        self.hover_attached = true;
        self.confirm_attached = true;
        self.state = SelectionState::Selecting { highlighted: None };
        debug!("element selection started");
        Ok(())
    }

    /// Cancel an in-flight capture. Returns whether anything was cancelled.
    pub fn end(&mut self, host: &mut dyn HostDocument) -> bool {
        if !self.is_selecting() {
            return false;
        }
        self.teardown(host);
        debug!("element selection cancelled");
        true
    }

    pub fn handle_event(&mut self, host: &mut dyn HostDocument, event: HostEvent) -> EventOutcome {
        let attached = match event.listener() {
            ListenerKind::Hover => self.hover_attached,
            ListenerKind::Confirm => self.confirm_attached,
        };
        if !attached {
            return EventOutcome::Ignored;
        }

        let SelectionState::Selecting { highlighted } = self.state else {
            return EventOutcome::Ignored;
        };

        match event {
            HostEvent::Hover(node) => {
                if highlighted == Some(node) {
                    return EventOutcome::Consumed;
                }
                if let Some(previous) = highlighted {
                    host.unhighlight(previous);
                }
                host.highlight(node);
                self.state = SelectionState::Selecting {
                    highlighted: Some(node),
                };
                EventOutcome::Consumed
            }

            HostEvent::Leave(node) => {
                if highlighted == Some(node) {
                    host.unhighlight(node);
                    self.state = SelectionState::Selecting { highlighted: None };
                }
                EventOutcome::Consumed
            }

            HostEvent::Confirm(node) => {
                // one-shot: drop the confirm listener before anything else
                host.detach(ListenerKind::Confirm);
                self.confirm_attached = false;

                let picked = pick(&*host, node);
                self.teardown(host);
                info!(element = %picked.element_id, page = %picked.page_id, "element picked");
                EventOutcome::Picked(picked)
            }
        }
    }

    fn teardown(&mut self, host: &mut dyn HostDocument) {
        if let Some(node) = self.highlighted() {
            host.unhighlight(node);
        }
        if self.confirm_attached {
            host.detach(ListenerKind::Confirm);
            self.confirm_attached = false;
        }
        if self.hover_attached {
            host.detach(ListenerKind::Hover);
            self.hover_attached = false;
        }
        host.set_cursor(Cursor::Default);
        self.state = SelectionState::Idle;
    }
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new()
    }
}

fn pick(host: &dyn HostDocument, node: NodeId) -> ElementPicked {
    let element_id = match host.identify(node) {
        Some(identity) => match identity.id {
            Some(id) if !id.is_empty() => id,
            _ => identity.tag,
        },
        None => String::new(),
    };

    ElementPicked {
        element_id,
        page_id: page_id_from_path(&host.current_path()),
    }
}

/// Last segment of a location path, `"unknown"` when that segment is empty.
pub fn page_id_from_path(path: &str) -> String {
    match path.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment.to_string(),
        _ => UNKNOWN_PAGE.to_string(),
    }
}
