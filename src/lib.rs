pub mod capture;
pub mod cli;
pub mod error;
pub mod session;
pub mod spec;
pub mod trace;

pub use capture::controller::{ElementPicked, EventOutcome, SelectionController, SelectionState};
pub use capture::host::{HostDocument, HostEvent, NodeId};
pub use error::BuilderError;
pub use session::panel::Panel;
pub use session::sink::{SNIPPET_FILENAME, SnippetSink};
pub use session::workbench::{PanelToggle, Workbench};
pub use spec::editor::SpecModel;
pub use spec::serializer::serialize;
pub use spec::spec_model::TestSpec;
