//! Ingredient sets and canonical cache keys
//!
//! A cached query is identified by the canonical keys of its include and
//! exclude sets. Order, casing, and duplicate spellings of the same
//! ingredient list must all map to the same key, because the key doubles as
//! the report file name.

use std::collections::BTreeSet;
use std::fmt;

/// An unordered set of ingredient names.
///
/// Names are trimmed and lowercased on entry; empty names are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientSet(BTreeSet<String>);

impl IngredientSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one ingredient name. Blank names are ignored.
    pub fn insert(&mut self, name: &str) {
        let name = name.trim().to_lowercase();
        if !name.is_empty() {
            self.0.insert(name);
        }
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name.trim().to_lowercase().as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Comma-joined form used in API query strings.
    pub fn to_param(&self) -> String {
        self.iter().collect::<Vec<_>>().join(",")
    }

    /// Deterministic, order-independent identifier for this set.
    ///
    /// Each name is normalized, the results are sorted, and the tokens are
    /// joined with `_`. The empty set maps to the empty string. Used both as
    /// the cache key and as the report file name.
    pub fn canonical_key(&self) -> String {
        let mut tokens: Vec<String> = self.iter().map(normalize).collect();
        tokens.sort();
        tokens.join("_")
    }
}

impl<S: AsRef<str>> FromIterator<S> for IngredientSet {
    fn from_iter<I: IntoIterator<Item = S>>(names: I) -> Self {
        let mut set = Self::new();
        for name in names {
            set.insert(name.as_ref());
        }
        set
    }
}

impl fmt::Display for IngredientSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.iter().collect::<Vec<_>>().join(", "))
    }
}

/// Normalize a single ingredient name for use in a canonical key:
/// lowercase, spaces become hyphens, anything outside `[a-z0-9_-]` is
/// silently dropped.
pub fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.trim().to_lowercase().chars() {
        match ch {
            ' ' => out.push('-'),
            'a'..='z' | '0'..='9' | '_' | '-' => out.push(ch),
            _ => {}
        }
    }
    out
}
