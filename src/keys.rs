//! Cache key derivation.
//!
//! Every domain owns a fixed prefix ending in `_`, so keys from different
//! payload types can never collide.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const RECIPE_LIST_PREFIX: &str = "recipes_";
pub const RECIPE_PREFIX: &str = "recipe_";
pub const REVIEWS_PREFIX: &str = "reviews_";

// == Recipe Params ==
/// Query parameters of a recipe list request.
///
/// Backed by a `BTreeMap`, so the canonical JSON form is independent of the
/// order parameters were added in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeParams(BTreeMap<String, Value>);

impl RecipeParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Canonical JSON: keys sorted, no whitespace.
    pub fn canonical_json(&self) -> String {
        // Serializing a map of plain JSON values cannot fail.
        serde_json::to_string(&self.0).unwrap_or_else(|_| "{}".to_string())
    }

    /// Parameters as upstream query pairs. Strings go out unquoted, `null`
    /// values are skipped.
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(name, value)| {
                let value = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (name.clone(), value)
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RecipeParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

// == Key Builders ==
pub fn recipe_list_key(params: &RecipeParams) -> String {
    format!("{}{}", RECIPE_LIST_PREFIX, params.canonical_json())
}

pub fn recipe_key(recipe_id: &str) -> String {
    format!("{}{}", RECIPE_PREFIX, recipe_id)
}

pub fn reviews_key(recipe_id: &str) -> String {
    format!("{}{}", REVIEWS_PREFIX, recipe_id)
}

/// Normalizes an optional identifier; blank ids count as missing.
pub fn non_empty_id(id: Option<&str>) -> Option<&str> {
    id.map(str::trim).filter(|id| !id.is_empty())
}
