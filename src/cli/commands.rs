use std::path::Path;

use crate::cli::config::ReplaySettings;
use crate::error::BuilderError;
use crate::session::script::{ReplayReport, parse_script, replay};
use crate::session::sink::{DirectorySink, SnippetSink, StdoutSink};
use crate::spec::serializer::serialize;
use crate::spec::spec_model::TestSpec;
use crate::trace::logger::TraceLogger;

// ============================================================================
// replay subcommand
// ============================================================================

pub fn cmd_replay(script_path: &str, settings: &ReplaySettings) -> Result<ReplayReport, BuilderError> {
    let content = std::fs::read_to_string(script_path)?;
    let script = parse_script(&content)?;

    let tracer = match &settings.trace_path {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };

    let mut sink: Box<dyn SnippetSink> = if settings.stdout {
        Box::new(StdoutSink)
    } else {
        Box::new(DirectorySink::new(&settings.out_dir))
    };

    let report = replay(&script, sink.as_mut(), &tracer)?;

    for receipt in &report.receipts {
        eprintln!(
            "Saved {} ({} bytes, sha1 {})",
            receipt.location, receipt.bytes, receipt.sha1
        );
    }
    for warning in &report.warnings {
        eprintln!("Warning: {}", warning);
    }
    Ok(report)
}

// ============================================================================
// render subcommand
// ============================================================================

pub fn cmd_render(spec_path: &str, output: Option<&str>) -> Result<(), BuilderError> {
    let spec = load_spec(spec_path)?;
    let snippet = serialize(&spec);

    match output {
        Some(path) => std::fs::write(path, &snippet)?,
        None => print!("{}", snippet),
    }
    Ok(())
}

/// Load a test spec from a JSON (`.json`) or YAML (anything else) file.
pub fn load_spec(path: &str) -> Result<TestSpec, BuilderError> {
    let content = std::fs::read_to_string(path)?;
    let is_json = Path::new(path)
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        Ok(serde_json::from_str(&content)?)
    } else {
        Ok(serde_yaml::from_str(&content)?)
    }
}
