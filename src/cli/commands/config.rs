//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{ForageError, ForageResult};
use crate::ui::{self, UiContext};
use std::path::PathBuf;

/// Execute the config command
pub fn execute(args: ConfigArgs, manager: &ConfigManager, config: &Config) -> ForageResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config),
        Some(ConfigAction::Path) => show_path(manager),
        Some(ConfigAction::Init { force }) => init_config(manager, force)?,
        Some(ConfigAction::Set { key, value }) => set_value(manager, config, &key, &value)?,
    }

    Ok(())
}

fn show_config(config: &Config) {
    let toml =
        toml::to_string_pretty(config).unwrap_or_else(|_| "Error serializing config".to_string());
    println!("{}", toml);
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}

fn init_config(manager: &ConfigManager, force: bool) -> ForageResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn(
            &ctx,
            &format!(
                "Config already exists at {} (use --force to overwrite)",
                path.display()
            ),
        );
        return Ok(());
    }

    let config = Config::default();
    manager.save(&config)?;

    ui::step_ok_detail(
        &ctx,
        "Configuration initialized",
        &path.display().to_string(),
    );

    Ok(())
}

fn set_value(
    manager: &ConfigManager,
    config: &Config,
    key: &str,
    value: &str,
) -> ForageResult<()> {
    let ctx = UiContext::detect();
    let mut config = config.clone();

    // Parse dot-separated key path
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["api", "key"] => config.api.key = value.to_string(),
        ["api", "base_url"] => config.api.base_url = value.to_string(),

        ["search", "limit"] => config.search.limit = parse_u32(value)?,
        ["search", "ignore_pantry"] => config.search.ignore_pantry = parse_bool(value)?,
        ["search", "default_exclude"] => {
            config.search.default_exclude = value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        ["cache", "db_file"] => config.cache.db_file = Some(PathBuf::from(value)),

        ["report", "output_dir"] => config.report.output_dir = PathBuf::from(value),
        ["report", "image_size"] => config.report.image_size = value.to_string(),

        _ => {
            ui::step_error(&ctx, &format!("Unknown config key: {}", key));
            eprintln!("Valid keys:");
            print_valid_keys();
            return Ok(());
        }
    }

    manager.save(&config)?;
    ui::step_ok(&ctx, &format!("Set {} = {}", key, value));

    Ok(())
}

fn parse_bool(value: &str) -> ForageResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ForageError::User(format!(
            "Invalid boolean value: {}. Use true/false",
            value
        ))),
    }
}

fn parse_u32(value: &str) -> ForageResult<u32> {
    value
        .parse()
        .map_err(|_| ForageError::User(format!("Invalid number: {}", value)))
}

fn print_valid_keys() {
    let keys = [
        "api.key",
        "api.base_url",
        "search.limit",
        "search.ignore_pantry",
        "search.default_exclude",
        "cache.db_file",
        "report.output_dir",
        "report.image_size",
    ];

    for key in keys {
        eprintln!("  {}", key);
    }
}
