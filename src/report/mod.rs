//! Static HTML report of search results
//!
//! Renders one card per recipe with nutrition facts and the used/missed
//! ingredient partition, plus a recommended-recipe banner. Templates are
//! embedded at compile time and filled by `$NAME` placeholder substitution.
//! The report file is named by the include set's canonical key so repeated
//! searches overwrite their own report instead of piling up.

use crate::error::{ForageError, ForageResult};
use crate::ingredient::IngredientSet;
use crate::recipe::{Measurement, Recipe};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

const PAGE_TEMPLATE: &str = include_str!("templates/page.html");
const RECIPE_TEMPLATE: &str = include_str!("templates/recipe.html");
const INGREDIENT_TEMPLATE: &str = include_str!("templates/ingredient.html");

/// An assembled HTML report.
#[derive(Debug, Clone)]
pub struct HtmlReport {
    html: String,
}

impl HtmlReport {
    /// Render a full report for a non-empty result list. `recommended`
    /// comes from [`crate::recipe::recommend`] over the same list.
    pub fn render(
        recipes: &[Recipe],
        recommended: &Recipe,
        include: &IngredientSet,
        image_size: &str,
    ) -> Self {
        let mut report = Self {
            html: PAGE_TEMPLATE.to_string(),
        };

        report.replace("$INCLUDED_INGREDIENTS", &include.to_string());
        report.replace("$RECOMMENDED_TITLE", &recommended.title);
        report.replace("$RECOMMENDED_SOURCE_URL", &recommended.source_url);
        report.replace_measurement("$RECOMMENDED_CARBS", recommended.carbs.as_ref());
        report.replace_measurement("$RECOMMENDED_PROTEIN", recommended.protein.as_ref());

        for recipe in recipes {
            report.add_recipe(recipe, include, image_size);
        }
        report.replace("$RECIPES", "");

        report
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Write the report into `dir`, named by the include set's canonical
    /// key (an empty include set falls back to `recipes.html`).
    pub fn save(&self, dir: &Path, include: &IngredientSet) -> ForageResult<PathBuf> {
        std::fs::create_dir_all(dir).map_err(|e| {
            ForageError::io(format!("creating report directory {}", dir.display()), e)
        })?;

        let key = include.canonical_key();
        let stem = if key.is_empty() { "recipes".to_string() } else { key };
        let path = dir.join(format!("{stem}.html"));

        debug!(path = %path.display(), "writing report");
        std::fs::write(&path, &self.html).map_err(|e| ForageError::ReportWrite {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }

    /// Append one recipe card. The card template ends with a fresh
    /// `$RECIPES` marker so cards chain in order.
    fn add_recipe(&mut self, recipe: &Recipe, include: &IngredientSet, image_size: &str) {
        self.replace("$RECIPES", RECIPE_TEMPLATE);

        let parts = recipe.reconcile(include);

        self.replace("$TITLE", &recipe.title);
        self.replace("$SOURCE_URL", &recipe.source_url);
        self.replace("$IMAGE_URL", &recipe.image_url(image_size));
        self.replace("$SUMMARY", &recipe.summary);

        self.replace_measurement("$CALORIES", recipe.calories.as_ref());
        self.replace_measurement("$PROTEIN", recipe.protein.as_ref());
        self.replace_measurement("$CARBS", recipe.carbs.as_ref());

        self.replace_ingredients("$USED_INGREDIENTS", &parts.used);
        self.replace_ingredients("$MISSED_INGREDIENTS", &parts.missed);
    }

    fn replace(&mut self, key: &str, value: &str) {
        self.html = self.html.replace(key, value);
    }

    fn replace_measurement(&mut self, key: &str, measurement: Option<&Measurement>) {
        match measurement {
            Some(m) => self.replace(key, &m.to_string()),
            None => self.replace(key, "n/a"),
        }
    }

    fn replace_ingredients(&mut self, key: &str, ingredients: &BTreeSet<String>) {
        let chips: Vec<String> = ingredients
            .iter()
            .map(|name| INGREDIENT_TEMPLATE.trim_end().replace("$INGREDIENT", name))
            .collect();
        self.replace(key, &chips.join("\n"));
    }
}
