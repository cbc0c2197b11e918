//! psync CLI
//!
//! The command-line interface for synchronizing configured project groups.

mod cli;
mod error;
mod output;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use psync_core::{ApplyOptions, BackendSet, Registry, SilentProgress, SyncEngine};

use cli::Cli;
use error::{CliError, Result};
use output::ConsoleProgress;

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Run the requested operation; `Ok(true)` means a clean report.
fn run() -> Result<bool> {
    let cli = Cli::parse();
    let verbosity = cli.verbosity();
    init_tracing(verbosity);

    let config_path = resolve_config_path(cli.config.as_deref())?;
    tracing::debug!(config = %config_path.display(), "loading configuration");

    let defs = psync_core::load_config(&config_path)?;
    let registry = Registry::from_raw(defs)?;
    let engine = SyncEngine::new(registry, BackendSet::with_defaults());

    let options = ApplyOptions {
        merge: cli.merge_style(),
        show_output: verbosity >= 2,
    };

    let report = if cli.json || verbosity == 0 {
        engine.apply(
            cli.operation(),
            cli.selectors(),
            &options,
            &mut SilentProgress,
        )
    } else {
        engine.apply(
            cli.operation(),
            cli.selectors(),
            &options,
            &mut ConsoleProgress,
        )
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output::print_summary(&report, verbosity == 0);
    }

    Ok(report.is_clean())
}

/// Map verbosity onto a tracing level: 0 errors only, 1 warnings, 2 debug.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::ERROR,
        1 => Level::WARN,
        _ => Level::DEBUG,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// The configuration file to load: the `-c` flag (home-expanded) or
/// `~/.psync/config.toml`.
fn resolve_config_path(flag: Option<&str>) -> Result<PathBuf> {
    match flag {
        Some(raw) => Ok(psync_fs::expand_home(raw)),
        None => {
            let home = dirs::home_dir().ok_or_else(|| {
                CliError::user("could not determine home directory for default config path")
            })?;
            Ok(home.join(".psync").join("config.toml"))
        }
    }
}
