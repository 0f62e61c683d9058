//! SQLite-backed read-through cache for recipe searches
//!
//! Maps a canonical (include, exclude) key pair to the recipes a search
//! returned. A hit is served entirely from storage; a miss fetches from the
//! remote source, then persists the recipes, the query row, and the link
//! rows in a single transaction before returning.

use crate::api::RecipeSource;
use crate::error::{ForageError, ForageResult};
use crate::ingredient::IngredientSet;
use crate::recipe::{Measurement, Recipe};
use chrono::Utc;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS recipes (
        id INTEGER PRIMARY KEY,
        title TEXT NOT NULL,
        source_url TEXT NOT NULL,
        image_type TEXT NOT NULL,
        summary TEXT NOT NULL,
        ingredients TEXT NOT NULL,
        calories_amount REAL,
        calories_unit TEXT,
        protein_amount REAL,
        protein_unit TEXT,
        carbs_amount REAL,
        carbs_unit TEXT
    );
    CREATE TABLE IF NOT EXISTS queries (
        query_id INTEGER PRIMARY KEY AUTOINCREMENT,
        include_key TEXT NOT NULL,
        exclude_key TEXT NOT NULL,
        fetched_at TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS query_recipes (
        query_id INTEGER NOT NULL REFERENCES queries (query_id),
        recipe_id INTEGER NOT NULL REFERENCES recipes (id),
        PRIMARY KEY (query_id, recipe_id)
    );
";

/// Summary of one cached query, for `forage cache list`.
#[derive(Debug, Clone, Serialize)]
pub struct CacheEntry {
    pub query_id: i64,
    pub include_key: String,
    pub exclude_key: String,
    pub recipe_count: i64,
    pub fetched_at: String,
}

/// Persistent read-through cache for recipe searches.
///
/// The connection is opened per logical operation and closed when the
/// operation returns; the schema is ensured on every open. Single-writer:
/// concurrent processes missing on the same key can race into duplicate
/// query rows, which this store does not guard against.
#[derive(Debug, Clone)]
pub struct QueryCache {
    db_path: PathBuf,
}

impl QueryCache {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Location of the database file.
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Return the cached recipes for this ingredient pair, fetching from
    /// `source` and persisting the result on a miss.
    ///
    /// The miss path is atomic: if the fetch fails nothing is written, and
    /// if any write fails the transaction rolls back, so the pair stays a
    /// miss and will be retried against the source on the next call. An
    /// empty result set is a legitimate answer and is cached like any other.
    pub fn fetch_or_retrieve(
        &self,
        include: &IngredientSet,
        exclude: &IngredientSet,
        source: &dyn RecipeSource,
    ) -> ForageResult<Vec<Recipe>> {
        let include_key = include.canonical_key();
        let exclude_key = exclude.canonical_key();

        let mut conn = self.open()?;

        if let Some(query_id) = find_query_id(&conn, &include_key, &exclude_key)? {
            info!(%include_key, %exclude_key, query_id, "cache hit");
            return linked_recipes(&conn, query_id);
        }

        info!(%include_key, %exclude_key, "cache miss, querying remote source");
        let recipes = source.search(include, exclude)?;

        let tx = conn.transaction()?;
        for recipe in &recipes {
            save_recipe(&tx, recipe)?;
        }
        let query_id = save_query(&tx, &include_key, &exclude_key)?;
        link_query(&tx, query_id, &recipes)?;
        tx.commit()?;

        debug!(query_id, count = recipes.len(), "cached query result");
        Ok(recipes)
    }

    /// All cached queries, most recent first.
    pub fn entries(&self) -> ForageResult<Vec<CacheEntry>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(
            "SELECT q.query_id, q.include_key, q.exclude_key, q.fetched_at,
                    COUNT(link.recipe_id)
             FROM queries q
             LEFT JOIN query_recipes link ON q.query_id = link.query_id
             GROUP BY q.query_id
             ORDER BY q.query_id DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(CacheEntry {
                query_id: row.get(0)?,
                include_key: row.get(1)?,
                exclude_key: row.get(2)?,
                fetched_at: row.get(3)?,
                recipe_count: row.get(4)?,
            })
        })?;

        let mut entries = Vec::new();
        for entry in rows {
            entries.push(entry?);
        }
        Ok(entries)
    }

    fn open(&self) -> ForageResult<Connection> {
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ForageError::io(format!("creating cache directory {}", parent.display()), e)
                })?;
            }
        }

        let conn = Connection::open(&self.db_path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(conn)
    }
}

fn find_query_id(
    conn: &Connection,
    include_key: &str,
    exclude_key: &str,
) -> ForageResult<Option<i64>> {
    conn.query_row(
        "SELECT query_id FROM queries WHERE include_key = ?1 AND exclude_key = ?2",
        params![include_key, exclude_key],
        |row| row.get(0),
    )
    .optional()
    .map_err(Into::into)
}

fn save_recipe(conn: &Connection, recipe: &Recipe) -> ForageResult<()> {
    let ingredients = serde_json::to_string(&recipe.ingredients)?;
    conn.execute(
        "INSERT OR REPLACE INTO recipes (
            id, title, source_url, image_type, summary, ingredients,
            calories_amount, calories_unit,
            protein_amount, protein_unit,
            carbs_amount, carbs_unit
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            recipe.id,
            recipe.title,
            recipe.source_url,
            recipe.image_type,
            recipe.summary,
            ingredients,
            recipe.calories.as_ref().map(|m| m.amount),
            recipe.calories.as_ref().map(|m| m.unit.as_str()),
            recipe.protein.as_ref().map(|m| m.amount),
            recipe.protein.as_ref().map(|m| m.unit.as_str()),
            recipe.carbs.as_ref().map(|m| m.amount),
            recipe.carbs.as_ref().map(|m| m.unit.as_str()),
        ],
    )?;
    Ok(())
}

fn save_query(conn: &Connection, include_key: &str, exclude_key: &str) -> ForageResult<i64> {
    conn.execute(
        "INSERT INTO queries (include_key, exclude_key, fetched_at) VALUES (?1, ?2, ?3)",
        params![include_key, exclude_key, Utc::now().to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

fn link_query(conn: &Connection, query_id: i64, recipes: &[Recipe]) -> ForageResult<()> {
    let mut stmt = conn
        .prepare("INSERT OR IGNORE INTO query_recipes (query_id, recipe_id) VALUES (?1, ?2)")?;
    for recipe in recipes {
        stmt.execute(params![query_id, recipe.id])?;
    }
    Ok(())
}

fn linked_recipes(conn: &Connection, query_id: i64) -> ForageResult<Vec<Recipe>> {
    let mut stmt = conn.prepare(
        "SELECT r.id, r.title, r.source_url, r.image_type, r.summary, r.ingredients,
                r.calories_amount, r.calories_unit,
                r.protein_amount, r.protein_unit,
                r.carbs_amount, r.carbs_unit
         FROM recipes r
         INNER JOIN query_recipes link ON r.id = link.recipe_id
         WHERE link.query_id = ?1",
    )?;

    let rows = stmt.query_map(params![query_id], recipe_from_row)?;
    let mut recipes = Vec::new();
    for recipe in rows {
        recipes.push(recipe?);
    }
    Ok(recipes)
}

fn recipe_from_row(row: &Row<'_>) -> rusqlite::Result<Recipe> {
    let ingredients_json: String = row.get(5)?;
    let ingredients: BTreeSet<String> = serde_json::from_str(&ingredients_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

    Ok(Recipe {
        id: row.get(0)?,
        title: row.get(1)?,
        source_url: row.get(2)?,
        image_type: row.get(3)?,
        summary: row.get(4)?,
        ingredients,
        calories: measurement(row.get(6)?, row.get(7)?),
        protein: measurement(row.get(8)?, row.get(9)?),
        carbs: measurement(row.get(10)?, row.get(11)?),
    })
}

fn measurement(amount: Option<f64>, unit: Option<String>) -> Option<Measurement> {
    amount.map(|amount| Measurement {
        amount,
        unit: unit.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::TempDir;

    struct ScriptedSource {
        recipes: Vec<Recipe>,
        calls: Cell<usize>,
        fail: bool,
    }

    impl ScriptedSource {
        fn returning(recipes: Vec<Recipe>) -> Self {
            Self {
                recipes,
                calls: Cell::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                recipes: Vec::new(),
                calls: Cell::new(0),
                fail: true,
            }
        }
    }

    impl RecipeSource for ScriptedSource {
        fn search(
            &self,
            _include: &IngredientSet,
            _exclude: &IngredientSet,
        ) -> ForageResult<Vec<Recipe>> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(ForageError::fetch("search backend down"));
            }
            Ok(self.recipes.clone())
        }
    }

    fn sample_recipe(id: i64) -> Recipe {
        Recipe {
            id,
            title: format!("Recipe {id}"),
            source_url: format!("https://example.com/recipes/{id}"),
            image_type: "jpg".into(),
            summary: "A hearty dish.".into(),
            ingredients: ["Egg", "flour"].iter().map(|s| s.to_string()).collect(),
            calories: Some(Measurement {
                amount: 250.0,
                unit: "kcal".into(),
            }),
            protein: Some(Measurement {
                amount: 8.5,
                unit: "g".into(),
            }),
            carbs: None,
        }
    }

    fn set(names: &[&str]) -> IngredientSet {
        names.iter().collect()
    }

    fn cache_in(temp: &TempDir) -> QueryCache {
        QueryCache::new(temp.path().join("recipes.db"))
    }

    #[test]
    fn miss_then_hit_fetches_once() {
        let temp = TempDir::new().unwrap();
        let cache = cache_in(&temp);
        let source = ScriptedSource::returning(vec![sample_recipe(1), sample_recipe(2)]);

        let first = cache
            .fetch_or_retrieve(&set(&["egg"]), &set(&[]), &source)
            .unwrap();
        let second = cache
            .fetch_or_retrieve(&set(&["egg"]), &set(&[]), &source)
            .unwrap();

        assert_eq!(source.calls.get(), 1);
        assert_eq!(first.len(), 2);
        let mut sorted = second.clone();
        sorted.sort_by_key(|r| r.id);
        assert_eq!(sorted, first);
    }

    #[test]
    fn hit_never_invokes_source() {
        let temp = TempDir::new().unwrap();
        let cache = cache_in(&temp);
        cache
            .fetch_or_retrieve(
                &set(&["egg"]),
                &set(&[]),
                &ScriptedSource::returning(vec![sample_recipe(1)]),
            )
            .unwrap();

        // A failing source proves the second call stays local
        let recipes = cache
            .fetch_or_retrieve(&set(&["egg"]), &set(&[]), &ScriptedSource::failing())
            .unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].title, "Recipe 1");
    }

    #[test]
    fn spelling_variants_share_one_entry() {
        let temp = TempDir::new().unwrap();
        let cache = cache_in(&temp);
        let source = ScriptedSource::returning(vec![sample_recipe(1)]);

        cache
            .fetch_or_retrieve(&set(&["Banana", "STRAWBERRY"]), &set(&[]), &source)
            .unwrap();
        cache
            .fetch_or_retrieve(&set(&["strawberry", "banana"]), &set(&[]), &source)
            .unwrap();

        assert_eq!(source.calls.get(), 1);
        assert_eq!(cache.entries().unwrap().len(), 1);
    }

    #[test]
    fn include_and_exclude_are_distinct_dimensions() {
        let temp = TempDir::new().unwrap();
        let cache = cache_in(&temp);
        let source = ScriptedSource::returning(vec![sample_recipe(1)]);

        cache
            .fetch_or_retrieve(&set(&["egg"]), &set(&["plums"]), &source)
            .unwrap();
        cache
            .fetch_or_retrieve(&set(&["egg"]), &set(&[]), &source)
            .unwrap();

        assert_eq!(source.calls.get(), 2);
        assert_eq!(cache.entries().unwrap().len(), 2);
    }

    #[test]
    fn failed_fetch_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let cache = cache_in(&temp);

        let err = cache
            .fetch_or_retrieve(&set(&["egg"]), &set(&[]), &ScriptedSource::failing())
            .unwrap_err();
        assert!(matches!(err, ForageError::Fetch { .. }));
        assert!(cache.entries().unwrap().is_empty());

        // The pair is still a miss and retries against the source
        let source = ScriptedSource::returning(vec![sample_recipe(1)]);
        let recipes = cache
            .fetch_or_retrieve(&set(&["egg"]), &set(&[]), &source)
            .unwrap();
        assert_eq!(source.calls.get(), 1);
        assert_eq!(recipes.len(), 1);
    }

    #[test]
    fn empty_result_is_cached() {
        let temp = TempDir::new().unwrap();
        let cache = cache_in(&temp);
        let source = ScriptedSource::returning(Vec::new());

        assert!(cache
            .fetch_or_retrieve(&set(&["gravel"]), &set(&[]), &source)
            .unwrap()
            .is_empty());

        // Second call is a hit on the empty mapping, no remote retry
        assert!(cache
            .fetch_or_retrieve(&set(&["gravel"]), &set(&[]), &ScriptedSource::failing())
            .unwrap()
            .is_empty());
        assert_eq!(cache.entries().unwrap().len(), 1);
    }

    #[test]
    fn refetch_replaces_recipe_by_id() {
        let temp = TempDir::new().unwrap();
        let cache = cache_in(&temp);

        cache
            .fetch_or_retrieve(
                &set(&["egg"]),
                &set(&[]),
                &ScriptedSource::returning(vec![sample_recipe(7)]),
            )
            .unwrap();

        let mut updated = sample_recipe(7);
        updated.title = "Renamed upstream".into();
        cache
            .fetch_or_retrieve(
                &set(&["flour"]),
                &set(&[]),
                &ScriptedSource::returning(vec![updated]),
            )
            .unwrap();

        // The shared recipe row was replaced; the first query now sees it
        let recipes = cache
            .fetch_or_retrieve(&set(&["egg"]), &set(&[]), &ScriptedSource::failing())
            .unwrap();
        assert_eq!(recipes[0].title, "Renamed upstream");
    }

    #[test]
    fn round_trip_preserves_all_fields() {
        let temp = TempDir::new().unwrap();
        let cache = cache_in(&temp);
        let original = sample_recipe(3);

        cache
            .fetch_or_retrieve(
                &set(&["egg"]),
                &set(&[]),
                &ScriptedSource::returning(vec![original.clone()]),
            )
            .unwrap();
        let restored = cache
            .fetch_or_retrieve(&set(&["egg"]), &set(&[]), &ScriptedSource::failing())
            .unwrap();

        // Raw ingredient casing and the absent carbs both survive storage
        assert_eq!(restored[0], original);
    }

    #[test]
    fn entries_reports_key_pair_and_count() {
        let temp = TempDir::new().unwrap();
        let cache = cache_in(&temp);
        cache
            .fetch_or_retrieve(
                &set(&["Banana", "strawberry"]),
                &set(&["plums"]),
                &ScriptedSource::returning(vec![sample_recipe(1), sample_recipe(2)]),
            )
            .unwrap();

        let entries = cache.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].include_key, "banana_strawberry");
        assert_eq!(entries[0].exclude_key, "plums");
        assert_eq!(entries[0].recipe_count, 2);
    }
}
