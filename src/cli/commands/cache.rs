//! Cache command - inspect or clear the query cache

use crate::cli::args::{CacheAction, CacheArgs, OutputFormat};
use crate::config::Config;
use crate::error::{ForageError, ForageResult};
use crate::store::{CacheEntry, QueryCache};
use console::style;
use std::io::{self, Write};

/// Execute the cache command
pub fn execute(args: CacheArgs, config: &Config) -> ForageResult<()> {
    let cache = QueryCache::new(config.cache.db_path());

    match args.action {
        CacheAction::List { format } => list_entries(&cache, format),
        CacheAction::Clear { yes } => clear(&cache, yes),
    }
}

/// List all cached queries
fn list_entries(cache: &QueryCache, format: OutputFormat) -> ForageResult<()> {
    let entries = cache.entries()?;

    if entries.is_empty() {
        println!("No cached queries.");
        return Ok(());
    }

    match format {
        OutputFormat::Table => print_table(&entries),
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Plain => print_plain(&entries),
    }

    Ok(())
}

fn print_table(entries: &[CacheEntry]) {
    println!(
        "{:<32} {:<20} {:>7} {:<25}",
        "INCLUDE", "EXCLUDE", "RECIPES", "FETCHED"
    );
    println!("{}", "-".repeat(86));

    for entry in entries {
        let exclude = if entry.exclude_key.is_empty() {
            style("(none)").dim().to_string()
        } else {
            entry.exclude_key.clone()
        };

        println!(
            "{:<32} {:<20} {:>7} {:<25}",
            entry.include_key, exclude, entry.recipe_count, entry.fetched_at
        );
    }

    println!();
    println!("Total: {} cached query(s)", entries.len());
}

fn print_json(entries: &[CacheEntry]) -> ForageResult<()> {
    println!("{}", serde_json::to_string_pretty(entries)?);
    Ok(())
}

fn print_plain(entries: &[CacheEntry]) {
    for entry in entries {
        println!("{}|{}", entry.include_key, entry.exclude_key);
    }
}

/// Remove the cache database file entirely
fn clear(cache: &QueryCache, skip_confirm: bool) -> ForageResult<()> {
    let path = cache.path();

    if !path.exists() {
        println!("No cache database to clear.");
        return Ok(());
    }

    if !skip_confirm {
        print!("Remove {}? [y/N] ", path.display());
        let _ = io::stdout().flush();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            println!("Failed to read input, aborting.");
            return Ok(());
        }

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    std::fs::remove_file(path)
        .map_err(|e| ForageError::io(format!("removing cache database {}", path.display()), e))?;

    println!("{} cache database removed", style("✓").green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn clear_with_yes_removes_database() {
        let temp = TempDir::new().unwrap();
        let db = temp.path().join("recipes.db");
        std::fs::write(&db, b"").unwrap();

        clear(&QueryCache::new(&db), true).unwrap();
        assert!(!db.exists());
    }

    #[test]
    fn clear_missing_database_is_a_noop() {
        let temp = TempDir::new().unwrap();
        let cache = QueryCache::new(temp.path().join("absent.db"));
        clear(&cache, true).unwrap();
    }

    #[test]
    fn list_on_fresh_store_is_empty() {
        let temp = TempDir::new().unwrap();
        let cache = QueryCache::new(temp.path().join("recipes.db"));
        list_entries(&cache, OutputFormat::Table).unwrap();
        assert!(cache.entries().unwrap().is_empty());
    }
}
