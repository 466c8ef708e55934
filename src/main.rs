use clap::Parser;
use test_builder::cli::commands::{cmd_render, cmd_replay};
use test_builder::cli::config::{Cli, Commands, load_config, resolve_replay_settings};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Replay {
            script,
            out_dir,
            stdout,
            trace,
        } => {
            let settings =
                resolve_replay_settings(&config, out_dir.as_deref(), stdout, trace.as_deref());
            let report = cmd_replay(&script, &settings)?;
            if cli.verbose > 0 {
                eprintln!(
                    "Replayed {} steps: {} picks, {} snippets saved",
                    report.steps_run,
                    report.picks,
                    report.receipts.len()
                );
            }
        }
        Commands::Render { spec, output } => {
            cmd_render(&spec, output.as_deref())?;
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise the `-v` count picks the level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
