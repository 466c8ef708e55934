use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::warn;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "test-builder",
    version,
    about = "Point-and-capture builder for declarative UI test snippets"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: test-builder.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a recorded editing session and save the generated snippets
    Replay {
        /// Path to the session script (YAML)
        #[arg(long)]
        script: String,

        /// Directory the snippet is saved into
        #[arg(short, long)]
        out_dir: Option<String>,

        /// Print snippets to stdout instead of saving them
        #[arg(long)]
        stdout: bool,

        /// Append a JSONL journal of every replayed step to this file
        #[arg(long)]
        trace: Option<String>,
    },

    /// Render a test spec (YAML or JSON) as a properties snippet
    Render {
        /// Path to the test spec file
        #[arg(long)]
        spec: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `test-builder.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_out_dir")]
    pub dir: String,

    #[serde(default)]
    pub stdout: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_out_dir(),
            stdout: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TraceConfig {
    pub path: Option<String>,
}

fn default_out_dir() -> String { ".".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("test-builder.yaml");
    let content = match std::fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(_) => return AppConfig::default(),
    };
    serde_yaml::from_str(&content).unwrap_or_else(|e| {
        warn!(path = config_path, error = %e, "ignoring malformed config file");
        AppConfig::default()
    })
}

// ============================================================================
// Settings resolution (CLI > config > defaults)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySettings {
    pub out_dir: String,
    pub stdout: bool,
    pub trace_path: Option<String>,
}

pub fn resolve_replay_settings(
    config: &AppConfig,
    out_dir: Option<&str>,
    stdout: bool,
    trace: Option<&str>,
) -> ReplaySettings {
    ReplaySettings {
        out_dir: out_dir.unwrap_or(&config.output.dir).to_string(),
        stdout: stdout || config.output.stdout,
        trace_path: trace
            .map(str::to_string)
            .or_else(|| config.trace.path.clone()),
    }
}
