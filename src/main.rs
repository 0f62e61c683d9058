//! Forage - recipe search with a local query cache
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use forage::cli::{Cli, Commands};
use forage::config::ConfigManager;
use forage::error::ForageResult;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> ForageResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn (spinners only), 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("forage=warn"),
        1 => EnvFilter::new("forage=info"),
        _ => EnvFilter::new("forage=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Load configuration
    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };
    let config = config_manager.load()?;

    // Dispatch to command
    match cli.command {
        Commands::Find(args) => forage::cli::commands::find(args, &config),
        Commands::Cache(args) => forage::cli::commands::cache(args, &config),
        Commands::Config(args) => forage::cli::commands::config(args, &config_manager, &config),
    }
}
