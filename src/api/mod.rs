//! Remote recipe search
//!
//! `RecipeSource` is the seam between the query cache and whatever performs
//! the actual search; `SpoonacularClient` is the production implementation.
//! The call is blocking, with no internal timeout or retry: a failure
//! surfaces immediately and nothing is cached for it.

pub mod types;

use crate::config::Config;
use crate::error::{ForageError, ForageResult};
use crate::ingredient::IngredientSet;
use crate::recipe::Recipe;
use tracing::debug;
use types::SearchResponse;

/// Default endpoint for the Spoonacular complexSearch API.
pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com/recipes/complexSearch";

/// Upstream caps the number of results per request.
const MAX_RESULTS: u32 = 100;

/// Performs a recipe search for an include/exclude ingredient pair.
///
/// May return between zero and the requested limit of recipes; zero results
/// is a legitimate answer, not a failure.
pub trait RecipeSource {
    fn search(
        &self,
        include: &IngredientSet,
        exclude: &IngredientSet,
    ) -> ForageResult<Vec<Recipe>>;
}

/// Blocking client for the Spoonacular complexSearch endpoint.
#[derive(Debug, Clone)]
pub struct SpoonacularClient {
    base_url: String,
    api_key: String,
    limit: u32,
    ignore_pantry: bool,
}

impl SpoonacularClient {
    /// Build a client from configuration. The API key must be set.
    pub fn new(config: &Config) -> ForageResult<Self> {
        let api_key = config.api.key.trim();
        if api_key.is_empty() {
            return Err(ForageError::ApiKeyMissing);
        }

        Ok(Self {
            base_url: config.api.base_url.clone(),
            api_key: api_key.to_string(),
            limit: config.search.limit.clamp(1, MAX_RESULTS),
            ignore_pantry: config.search.ignore_pantry,
        })
    }
}

impl RecipeSource for SpoonacularClient {
    fn search(
        &self,
        include: &IngredientSet,
        exclude: &IngredientSet,
    ) -> ForageResult<Vec<Recipe>> {
        debug!(
            include = %include.to_param(),
            exclude = %exclude.to_param(),
            limit = self.limit,
            "querying recipe search API"
        );

        let mut response = ureq::get(&self.base_url)
            .query("apiKey", &self.api_key)
            .query("ignorePantry", if self.ignore_pantry { "true" } else { "false" })
            .query("includeIngredients", include.to_param())
            .query("excludeIngredients", exclude.to_param())
            .query("addRecipeNutrition", "true")
            .query("number", self.limit.to_string())
            .call()
            .map_err(|e| ForageError::fetch(e.to_string()))?;

        let body: SearchResponse = response
            .body_mut()
            .read_json()
            .map_err(|e| ForageError::fetch(e.to_string()))?;

        Ok(body
            .results
            .into_iter()
            .filter_map(Recipe::from_search_result)
            .collect())
    }
}
