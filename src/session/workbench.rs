use tracing::{debug, warn};

use crate::capture::controller::EventOutcome;
use crate::capture::host::{HostDocument, HostEvent};
use crate::session::panel::{Dispatched, Panel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelToggle {
    Opened,
    Closed,
    /// The host had no surface to put a panel on
    Unavailable,
}

/// Host integration layer: owns at most one panel and reacts to the
/// toolbar's toggle signal.
#[derive(Debug, Default)]
pub struct Workbench {
    panel: Option<Panel>,
}

impl Workbench {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.panel.is_some()
    }

    pub fn panel(&self) -> Option<&Panel> {
        self.panel.as_ref()
    }

    pub fn panel_mut(&mut self) -> Option<&mut Panel> {
        self.panel.as_mut()
    }

    /// Open a fresh panel, or close the open one (cancelling any capture).
    pub fn toggle_panel(&mut self, host: &mut dyn HostDocument) -> PanelToggle {
        match self.panel.take() {
            Some(panel) => {
                panel.close(host);
                debug!("panel closed");
                PanelToggle::Closed
            }
            None if !host.has_surface() => {
                warn!("cannot open panel: host document has no surface");
                PanelToggle::Unavailable
            }
            None => {
                self.panel = Some(Panel::open());
                debug!("panel opened");
                PanelToggle::Opened
            }
        }
    }

    /// Route a pointer event. Without a panel there are no listeners.
    pub fn handle_host_event(&mut self, host: &mut dyn HostDocument, event: HostEvent) -> Dispatched {
        match self.panel.as_mut() {
            Some(panel) => panel.handle_host_event(host, event),
            None => Dispatched {
                outcome: EventOutcome::Ignored,
                action: None,
            },
        }
    }
}
