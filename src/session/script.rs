use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::capture::controller::EventOutcome;
use crate::capture::host::HostEvent;
use crate::capture::scripted::{DocumentSpec, ElementRef, ScriptedDocument};
use crate::error::BuilderError;
use crate::session::panel::Panel;
use crate::session::sink::{SaveReceipt, SnippetSink};
use crate::session::workbench::{PanelToggle, Workbench};
use crate::spec::editor::{ActionEdit, AssertionEdit};
use crate::spec::spec_model::{SpecMeta, TestSpec};
use crate::trace::{logger::TraceLogger, trace::TraceEvent};

/// A recorded editing session: the page it ran on and what the user did.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplayScript {
    #[serde(default)]
    pub document: DocumentSpec,
    pub steps: Vec<ScriptStep>,
}

/// One user or host interaction. Row indices address current positions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Toolbar toggle: open a fresh panel or close the open one
    TogglePanel,

    /// The document moves to another location
    Navigate { path: String },

    SetMeta(SpecMeta),

    /// "Add Action": start picking an element
    BeginCapture,

    CancelCapture,

    Hover { element: ElementRef },

    Leave { element: ElementRef },

    Confirm { element: ElementRef },

    /// Append an action without picking an element
    AddAction,

    EditAction { index: usize, edit: ActionEdit },

    RemoveAction { index: usize },

    AddAssertion,

    EditAssertion { index: usize, edit: AssertionEdit },

    RemoveAssertion { index: usize },

    /// "Generate & Download"
    Generate,
}

impl ScriptStep {
    pub fn label(&self) -> &'static str {
        match self {
            ScriptStep::TogglePanel => "toggle_panel",
            ScriptStep::Navigate { .. } => "navigate",
            ScriptStep::SetMeta(_) => "set_meta",
            ScriptStep::BeginCapture => "begin_capture",
            ScriptStep::CancelCapture => "cancel_capture",
            ScriptStep::Hover { .. } => "hover",
            ScriptStep::Leave { .. } => "leave",
            ScriptStep::Confirm { .. } => "confirm",
            ScriptStep::AddAction => "add_action",
            ScriptStep::EditAction { .. } => "edit_action",
            ScriptStep::RemoveAction { .. } => "remove_action",
            ScriptStep::AddAssertion => "add_assertion",
            ScriptStep::EditAssertion { .. } => "edit_assertion",
            ScriptStep::RemoveAssertion { .. } => "remove_assertion",
            ScriptStep::Generate => "generate",
        }
    }
}

/// What a replay produced.
#[derive(Debug, Default)]
pub struct ReplayReport {
    pub steps_run: usize,
    pub picks: usize,
    pub receipts: Vec<SaveReceipt>,
    /// Non-fatal failures (unavailable surface, rejected saves), in order
    pub warnings: Vec<String>,
    /// Spec of the panel still open at the end, if any
    pub final_spec: Option<TestSpec>,
}

pub fn parse_script(yaml: &str) -> Result<ReplayScript, BuilderError> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Drive a workbench through a script against an in-memory document.
///
/// Host failures (no surface, rejected save) are recorded as warnings and the
/// replay continues. Steps that cannot be applied at all (no open panel,
/// unknown element or row) abort the replay.
pub fn replay(
    script: &ReplayScript,
    sink: &mut dyn SnippetSink,
    tracer: &TraceLogger,
) -> Result<ReplayReport, BuilderError> {
    let mut host = ScriptedDocument::new(script.document.clone());
    let mut bench = Workbench::new();
    let mut report = ReplayReport::default();

    for (index, step) in script.steps.iter().enumerate() {
        let selection = bench.panel().map(|p| p.selection_state());
        let trace = TraceEvent::now(index as u64, selection).with_decision(step.label());
        let fail = |reason: String| BuilderError::ScriptStep {
            index,
            label: step.label(),
            reason,
        };
        debug!(index, step = step.label(), "replaying step");

        let trace = match step {
            ScriptStep::TogglePanel => match bench.toggle_panel(&mut host) {
                PanelToggle::Unavailable => {
                    let err = BuilderError::AttachmentUnavailable;
                    report.warnings.push(format!("step {}: {}", index, err));
                    trace.with_error(err)
                }
                toggled => trace.with_decision(format!("{:?}", toggled).to_lowercase()),
            },

            ScriptStep::Navigate { path } => {
                host.navigate(path);
                trace
            }

            ScriptStep::SetMeta(meta) => {
                open_panel(&mut bench).map_err(&fail)?.model.set_meta(meta.clone());
                trace
            }

            ScriptStep::BeginCapture => {
                let panel = open_panel(&mut bench).map_err(&fail)?;
                match panel.begin_capture(&mut host) {
                    Ok(()) => trace,
                    Err(err) => {
                        report.warnings.push(format!("step {}: {}", index, err));
                        trace.with_error(err)
                    }
                }
            }

            ScriptStep::CancelCapture => {
                let cancelled = open_panel(&mut bench).map_err(&fail)?.cancel_capture(&mut host);
                if cancelled { trace } else { trace.with_decision("nothing_to_cancel") }
            }

            ScriptStep::Hover { element } | ScriptStep::Leave { element } | ScriptStep::Confirm { element } => {
                let node = host
                    .resolve(element)
                    .ok_or_else(|| fail(format!("no element matches {:?}", element)))?;
                let event = match step {
                    ScriptStep::Hover { .. } => HostEvent::Hover(node),
                    ScriptStep::Leave { .. } => HostEvent::Leave(node),
                    _ => HostEvent::Confirm(node),
                };
                let dispatched = bench.handle_host_event(&mut host, event);
                match dispatched.outcome {
                    EventOutcome::Picked(picked) => {
                        report.picks += 1;
                        trace.with_pick(&picked)
                    }
                    EventOutcome::Ignored => trace.with_decision("ignored"),
                    EventOutcome::Consumed => trace,
                }
            }

            ScriptStep::AddAction => {
                open_panel(&mut bench).map_err(&fail)?.model.add_action(None);
                trace
            }

            ScriptStep::EditAction { index: row, edit } => {
                let model = &mut open_panel(&mut bench).map_err(&fail)?.model;
                let handle = model
                    .action_at(*row)
                    .ok_or_else(|| fail(format!("no action at index {}", row)))?;
                model.edit_action(handle, edit.clone()).map_err(|e| fail(e.to_string()))?;
                trace
            }

            ScriptStep::RemoveAction { index: row } => {
                let model = &mut open_panel(&mut bench).map_err(&fail)?.model;
                let handle = model
                    .action_at(*row)
                    .ok_or_else(|| fail(format!("no action at index {}", row)))?;
                model.remove_action(handle).map_err(|e| fail(e.to_string()))?;
                trace
            }

            ScriptStep::AddAssertion => {
                open_panel(&mut bench).map_err(&fail)?.model.add_assertion();
                trace
            }

            ScriptStep::EditAssertion { index: row, edit } => {
                let model = &mut open_panel(&mut bench).map_err(&fail)?.model;
                let handle = model
                    .assertion_at(*row)
                    .ok_or_else(|| fail(format!("no assertion at index {}", row)))?;
                model.edit_assertion(handle, edit.clone()).map_err(|e| fail(e.to_string()))?;
                trace
            }

            ScriptStep::RemoveAssertion { index: row } => {
                let model = &mut open_panel(&mut bench).map_err(&fail)?.model;
                let handle = model
                    .assertion_at(*row)
                    .ok_or_else(|| fail(format!("no assertion at index {}", row)))?;
                model.remove_assertion(handle).map_err(|e| fail(e.to_string()))?;
                trace
            }

            ScriptStep::Generate => {
                let panel = open_panel(&mut bench).map_err(&fail)?;
                match panel.generate(sink) {
                    Ok(receipt) => {
                        let trace = trace.with_artifact(&receipt.sha1);
                        report.receipts.push(receipt);
                        trace
                    }
                    Err(err) => {
                        report.warnings.push(format!("step {}: {}", index, err));
                        trace.with_error(err)
                    }
                }
            }
        };

        tracer.log(&trace);
        report.steps_run += 1;
    }

    report.final_spec = bench.panel().map(|p| p.model.snapshot());
    Ok(report)
}

fn open_panel(bench: &mut Workbench) -> Result<&mut Panel, String> {
    bench
        .panel_mut()
        .ok_or_else(|| BuilderError::PanelClosed.to_string())
}
