use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuilderError {
    /// The host document has no surface to attach listeners or a panel to
    #[error("host document has no attachable surface")]
    AttachmentUnavailable,

    /// The save capability rejected the artifact
    #[error("failed to save {filename}: {reason}")]
    SaveFailed { filename: String, reason: String },

    /// An edit referenced an action/assertion that no longer exists
    #[error("no {kind} with handle {handle}")]
    UnknownHandle { kind: &'static str, handle: u64 },

    /// An operation needed an open panel
    #[error("panel is not open")]
    PanelClosed,

    /// A replay step could not be applied
    #[error("step {index} ({label}): {reason}")]
    ScriptStep {
        index: usize,
        label: &'static str,
        reason: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
