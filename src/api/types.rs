//! Typed shapes for the Spoonacular complexSearch response
//!
//! Only the fields the record factory reads are declared; the rest of the
//! payload is ignored during deserialization. Every field is optional so a
//! sparse result degrades to empty values instead of a decode failure.

use serde::Deserialize;

/// Top-level complexSearch response body.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// One recipe element of the response.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub source_url: Option<String>,
    pub image_type: Option<String>,
    pub summary: Option<String>,
    pub nutrition: Option<Nutrition>,
}

/// Nutrition section carrying both the nutrient table and the ingredient
/// list (present when `addRecipeNutrition=true` is requested).
#[derive(Debug, Default, Deserialize)]
pub struct Nutrition {
    #[serde(default)]
    pub nutrients: Vec<Nutrient>,
    #[serde(default)]
    pub ingredients: Vec<NutritionIngredient>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Nutrient {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub unit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NutritionIngredient {
    pub name: Option<String>,
}
