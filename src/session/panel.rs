use tracing::{info, warn};

use crate::capture::controller::{EventOutcome, SelectionController, SelectionState};
use crate::capture::host::{HostDocument, HostEvent};
use crate::error::BuilderError;
use crate::session::sink::{SNIPPET_FILENAME, SaveReceipt, SnippetSink, artifact_fingerprint};
use crate::spec::editor::{ActionHandle, SpecModel};
use crate::spec::serializer::serialize;

/// Result of routing one host event through the panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatched {
    pub outcome: EventOutcome,
    /// Action appended because of a pick
    pub action: Option<ActionHandle>,
}

/// One open editing session: the spec being built plus its capture controller.
///
/// Created empty when the panel opens and dropped when it closes; nothing is
/// carried over between panels.
#[derive(Debug, Default)]
pub struct Panel {
    pub model: SpecModel,
    controller: SelectionController,
}

impl Panel {
    pub fn open() -> Self {
        Panel {
            model: SpecModel::new(),
            controller: SelectionController::new(),
        }
    }

    pub fn selection_state(&self) -> SelectionState {
        self.controller.state()
    }

    pub fn is_selecting(&self) -> bool {
        self.controller.is_selecting()
    }

    /// "Add Action": start picking an element for a new action.
    pub fn begin_capture(&mut self, host: &mut dyn HostDocument) -> Result<(), BuilderError> {
        self.controller.begin(host)
    }

    pub fn cancel_capture(&mut self, host: &mut dyn HostDocument) -> bool {
        self.controller.end(host)
    }

    pub fn handle_host_event(&mut self, host: &mut dyn HostDocument, event: HostEvent) -> Dispatched {
        let outcome = self.controller.handle_event(host, event);
        let action = match &outcome {
            EventOutcome::Picked(picked) => Some(self.model.add_action(Some(picked))),
            _ => None,
        };
        Dispatched { outcome, action }
    }

    /// Render the current spec and hand it to the save capability once.
    ///
    /// A failed save leaves the model as it was, so the caller can retry.
    pub fn generate(&self, sink: &mut dyn SnippetSink) -> Result<SaveReceipt, BuilderError> {
        let spec = self.model.snapshot();
        let contents = serialize(&spec);

        match sink.save(&contents, SNIPPET_FILENAME) {
            Ok(location) => {
                let receipt = SaveReceipt {
                    filename: SNIPPET_FILENAME.to_string(),
                    location,
                    bytes: contents.len(),
                    sha1: artifact_fingerprint(&contents),
                };
                info!(
                    location = %receipt.location,
                    bytes = receipt.bytes,
                    actions = spec.actions.len(),
                    assertions = spec.assertions.len(),
                    "test snippet saved"
                );
                Ok(receipt)
            }
            Err(e) => {
                warn!(error = %e, "saving test snippet failed");
                Err(BuilderError::SaveFailed {
                    filename: SNIPPET_FILENAME.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Tear the panel down, cancelling any capture first.
    pub fn close(mut self, host: &mut dyn HostDocument) {
        self.controller.end(host);
    }
}
