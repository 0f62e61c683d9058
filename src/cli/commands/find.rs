//! Find command - search recipes, cache the query, build the report

use crate::api::SpoonacularClient;
use crate::cli::args::FindArgs;
use crate::config::Config;
use crate::error::ForageResult;
use crate::ingredient::IngredientSet;
use crate::recipe::recommend;
use crate::report::HtmlReport;
use crate::store::QueryCache;
use crate::ui::{self, TaskSpinner, UiContext};
use tracing::debug;

/// Execute the find command
pub fn execute(args: FindArgs, config: &Config) -> ForageResult<()> {
    let ctx = UiContext::detect();

    let include: IngredientSet = args.ingredients.iter().collect();
    let exclude: IngredientSet = if args.exclude.is_empty() {
        config.search.default_exclude.iter().collect()
    } else {
        args.exclude.iter().collect()
    };
    debug!(include = %include, exclude = %exclude, "resolved ingredient sets");

    let client = build_client(&args, config)?;
    let cache = QueryCache::new(config.cache.db_path());

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start("Searching recipes...");
    let recipes = match cache.fetch_or_retrieve(&include, &exclude, &client) {
        Ok(recipes) => recipes,
        Err(e) => {
            spinner.stop_error("Search failed");
            return Err(e);
        }
    };

    if recipes.is_empty() {
        spinner.stop_warn("No recipes found for this ingredient combination");
        return Ok(());
    }
    spinner.stop(&format!("Found {} recipe(s)", recipes.len()));

    // recommend only returns None for an empty list, handled above
    let Some(best) = recommend(&recipes) else {
        return Ok(());
    };
    ui::step_ok_detail(
        &ctx,
        &format!("Recommended: {}", best.title),
        &best.source_url,
    );

    if args.no_report {
        return Ok(());
    }

    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| config.report.output_dir.clone());
    let report = HtmlReport::render(&recipes, best, &include, &config.report.image_size);
    let path = report.save(&output_dir, &include)?;

    ui::outro_success(&ctx, &format!("Report saved to {}", path.display()));
    Ok(())
}

/// Apply CLI overrides on top of the loaded configuration.
fn build_client(args: &FindArgs, config: &Config) -> ForageResult<SpoonacularClient> {
    let mut effective = config.clone();
    if let Some(ref key) = args.api_key {
        effective.api.key = key.clone();
    }
    if let Some(limit) = args.limit {
        effective.search.limit = limit;
    }
    if args.ignore_pantry {
        effective.search.ignore_pantry = true;
    }
    SpoonacularClient::new(&effective)
}
