//! Recipe records, ingredient reconciliation, and the recommendation rule

use crate::api::types::{Nutrient, SearchResult};
use crate::ingredient::IngredientSet;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Default image size requested from the recipe CDN.
pub const DEFAULT_IMAGE_SIZE: &str = "636x393";

/// A nutrient measurement as reported by the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub amount: f64,
    pub unit: String,
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.unit)
    }
}

/// One recipe as returned by the search source.
///
/// The id is assigned by the source and is unique within a fetch batch, but
/// the source may rotate ids over time; memoization correctness depends only
/// on the query key, the id just keys recipe storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub source_url: String,
    pub image_type: String,
    pub summary: String,
    /// Ingredient names exactly as the source spells them
    pub ingredients: BTreeSet<String>,
    pub calories: Option<Measurement>,
    pub protein: Option<Measurement>,
    pub carbs: Option<Measurement>,
}

/// Ingredient partition of a recipe against a requested include set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Requested ingredients the recipe uses (recipe spellings)
    pub used: BTreeSet<String>,
    /// Ingredients the recipe needs that were not requested
    pub missed: BTreeSet<String>,
    /// Requested ingredients the recipe does not use
    pub unused: BTreeSet<String>,
}

impl Recipe {
    /// Build a record from one element of the search response.
    ///
    /// Missing fields map to empty strings, an empty ingredient set, or an
    /// absent measurement. An element without an id is unusable and yields
    /// `None`; the caller skips it.
    pub fn from_search_result(raw: SearchResult) -> Option<Self> {
        let id = raw.id?;
        let nutrition = raw.nutrition.unwrap_or_default();

        let ingredients: BTreeSet<String> = nutrition
            .ingredients
            .into_iter()
            .filter_map(|i| i.name)
            .filter(|name| !name.trim().is_empty())
            .collect();

        let by_name: HashMap<String, &Nutrient> = nutrition
            .nutrients
            .iter()
            .filter_map(|n| Some((n.name.as_ref()?.to_lowercase(), n)))
            .collect();

        Some(Self {
            id,
            title: raw.title.unwrap_or_default(),
            source_url: raw.source_url.unwrap_or_default(),
            image_type: raw.image_type.unwrap_or_default(),
            summary: raw.summary.unwrap_or_default(),
            ingredients,
            calories: find_nutrient(&by_name, "calories"),
            protein: find_nutrient(&by_name, "protein"),
            carbs: find_nutrient(&by_name, "carbohydrates"),
        })
    }

    /// Partition this recipe's ingredients against the requested include
    /// set. Comparison folds both sides to lowercase, so a recipe found by a
    /// query always reports the queried ingredients as used regardless of
    /// the source's casing.
    pub fn reconcile(&self, include: &IngredientSet) -> Reconciliation {
        let mut used = BTreeSet::new();
        let mut missed = BTreeSet::new();
        for name in &self.ingredients {
            if include.contains(name) {
                used.insert(name.clone());
            } else {
                missed.insert(name.clone());
            }
        }

        let recipe_names: BTreeSet<String> =
            self.ingredients.iter().map(|n| n.to_lowercase()).collect();
        let unused = include
            .iter()
            .filter(|name| !recipe_names.contains(*name))
            .map(String::from)
            .collect();

        Reconciliation {
            used,
            missed,
            unused,
        }
    }

    /// Image URL on the recipe CDN. Pure formatting, no network call.
    pub fn image_url(&self, size: &str) -> String {
        format!(
            "https://img.spoonacular.com/recipes/{}-{}.{}",
            self.id, size, self.image_type
        )
    }

    fn carbs_rank(&self) -> f64 {
        // Absent carbs sorts after every measured value
        self.carbs.as_ref().map_or(f64::INFINITY, |m| m.amount)
    }

    fn protein_rank(&self) -> f64 {
        self.protein.as_ref().map_or(0.0, |m| m.amount)
    }
}

fn find_nutrient(by_name: &HashMap<String, &Nutrient>, name: &str) -> Option<Measurement> {
    let nutrient = by_name.get(name)?;
    Some(Measurement {
        amount: nutrient.amount?,
        unit: nutrient.unit.clone().unwrap_or_default(),
    })
}

/// Pick the recipe with the least carbohydrates, breaking ties by the most
/// protein. Returns `None` for an empty slice; callers that have already
/// checked for results can rely on `Some`.
pub fn recommend(recipes: &[Recipe]) -> Option<&Recipe> {
    recipes.iter().min_by(|a, b| {
        a.carbs_rank()
            .total_cmp(&b.carbs_rank())
            .then_with(|| b.protein_rank().total_cmp(&a.protein_rank()))
    })
}
