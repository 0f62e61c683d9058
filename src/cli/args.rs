//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Forage - recipe search with a local query cache
///
/// Finds recipes that use the ingredients you have, memoizes every search
/// in a local database, and writes an HTML report of the results.
#[derive(Parser, Debug)]
#[command(name = "forage")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "FORAGE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search recipes for a set of ingredients
    Find(FindArgs),

    /// Inspect or clear the local query cache
    Cache(CacheArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the find command
#[derive(Parser, Debug)]
pub struct FindArgs {
    /// Ingredients the recipes should use
    #[arg(required = true)]
    pub ingredients: Vec<String>,

    /// Ingredients the recipes must not contain (comma-separated)
    #[arg(short = 'x', long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Number of results to request, 1-100 (overrides config)
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Skip typical pantry staples (water, salt, flour) when matching
    #[arg(long)]
    pub ignore_pantry: bool,

    /// Spoonacular API key (overrides config)
    #[arg(long, env = "FORAGE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Directory to write the HTML report into (overrides config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print results without writing the HTML report
    #[arg(long)]
    pub no_report: bool,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Subcommand for cache
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// List cached queries
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Remove the cache database
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., api.key)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Output format for list commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}
