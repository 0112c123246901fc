use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use std::path::PathBuf;
use textlog::config::Config;
use textlog::services::tracing_setup;
use textlog::{script, History};

/// Replay edit scripts against a versioned text history
#[derive(Parser, Debug)]
#[command(name = "textlog")]
#[command(about = "Run an edit script and inspect the resulting text history", long_about = None)]
#[command(version)]
struct Args {
    /// Edit script to run (JSON array of commands)
    #[arg(value_name = "SCRIPT")]
    script: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file for diagnostics (default: stderr)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Initial text (overrides the configured one)
    #[arg(long, value_name = "TEXT")]
    initial: Option<String>,

    /// Print the action log as JSON lines instead of the text
    #[arg(long)]
    actions: bool,

    /// First version of the --actions window (default: 0)
    #[arg(long, value_name = "VERSION", requires = "actions")]
    from: Option<u64>,

    /// End of the --actions window, exclusive (default: current version)
    #[arg(long, value_name = "VERSION", requires = "actions")]
    to: Option<u64>,

    /// Print the text as it was at this version
    #[arg(long, value_name = "VERSION", conflicts_with = "actions")]
    at: Option<u64>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn load_config(args: &Args) -> AnyhowResult<Config> {
    match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn run(args: Args, config: Config) -> AnyhowResult<()> {
    let script_path = args.script.context("No script given")?;
    let commands = script::load(&script_path)
        .with_context(|| format!("Failed to load script {}", script_path.display()))?;

    let initial = args
        .initial
        .unwrap_or_else(|| config.history.initial_text.clone());
    let mut history = History::with_config(initial, &config.history);

    if let Err(e) = script::run(&mut history, &commands) {
        tracing::warn!("Script stopped at version {}: {}", history.version(), e);
        return Err(e).with_context(|| format!("Failed to run {}", script_path.display()));
    }
    tracing::info!("Script finished at version {}", history.version());

    if args.actions {
        let from = args.from.unwrap_or(0);
        let to = args.to.unwrap_or_else(|| history.version());
        for action in history.get_actions(from..to)? {
            println!("{}", serde_json::to_string(action)?);
        }
    } else if let Some(version) = args.at {
        println!("{}", history.text_at(version)?);
    } else {
        println!("{}", history.text());
    }
    eprintln!("version {}", history.version());

    Ok(())
}

fn main() -> AnyhowResult<()> {
    // Parse command-line arguments
    let args = Args::parse();

    let config = load_config(&args)?;

    // Handle --dump-config early (no script needed)
    if args.dump_config {
        let json = serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
        println!("{}", json);
        return Ok(());
    }

    tracing_setup::init_global(args.log_file.as_deref(), &config.logging.filter)
        .context("Failed to set up logging")?;
    tracing::debug!("Starting with {:?}", args);

    run(args, config)
}
