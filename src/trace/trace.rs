use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::capture::controller::{ElementPicked, SelectionState};

/// One line of the session journal.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub step: u64,

    pub panel_open: bool,
    pub selection: String,

    pub decision: Option<String>,
    pub picked: Option<ElementPicked>,

    pub artifact_sha1: Option<String>,
    pub error: Option<String>,
}

impl TraceEvent {
    pub fn now(step: u64, selection: Option<SelectionState>) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            step,
            panel_open: selection.is_some(),
            selection: match selection {
                Some(SelectionState::Selecting { .. }) => "selecting".into(),
                Some(SelectionState::Idle) | None => "idle".into(),
            },
            decision: None,
            picked: None,
            artifact_sha1: None,
            error: None,
        }
    }

    pub fn with_decision(mut self, decision: impl ToString) -> Self {
        self.decision = Some(decision.to_string());
        self
    }

    pub fn with_pick(mut self, picked: &ElementPicked) -> Self {
        self.picked = Some(picked.clone());
        self
    }

    pub fn with_artifact(mut self, sha1: impl ToString) -> Self {
        self.artifact_sha1 = Some(sha1.to_string());
        self
    }

    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.error = Some(error.to_string());
        self
    }
}
