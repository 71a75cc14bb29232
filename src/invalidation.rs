//! Invalidation rule table.
//!
//! Maps each mutating event to the store entries it can make stale. Rules are
//! plain data so the coherency contract can be checked without any network.

use crate::keys::{recipe_key, reviews_key, RECIPE_LIST_PREFIX, RECIPE_PREFIX, REVIEWS_PREFIX};

// == Domain ==
/// Which store a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    RecipeList,
    RecipeDetail,
    Reviews,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::RecipeList => "recipes",
            Domain::RecipeDetail => "recipe",
            Domain::Reviews => "reviews",
        }
    }
}

// == Target ==
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// One exact key
    Key(String),
    /// Every key starting with this string
    Prefix(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub domain: Domain,
    pub target: Target,
}

impl Rule {
    fn key(domain: Domain, key: String) -> Self {
        Self {
            domain,
            target: Target::Key(key),
        }
    }

    fn prefix(domain: Domain, prefix: &'static str) -> Self {
        Self {
            domain,
            target: Target::Prefix(prefix),
        }
    }
}

// == Cache Event ==
/// A successful write that may have made cached reads stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
    ReviewCreated { recipe_id: String },
    /// `recipe_id` is `None` when the review was addressed by its own id only.
    ReviewUpdated { recipe_id: Option<String> },
    ReviewDeleted { recipe_id: Option<String> },
    RecipeCreated,
    RecipeUpdated { recipe_id: String },
    RecipeDeleted { recipe_id: String },
    /// Avatar or username changed
    ProfileUpdated,
}

impl CacheEvent {
    pub fn name(&self) -> &'static str {
        match self {
            CacheEvent::ReviewCreated { .. } => "review_created",
            CacheEvent::ReviewUpdated { .. } => "review_updated",
            CacheEvent::ReviewDeleted { .. } => "review_deleted",
            CacheEvent::RecipeCreated => "recipe_created",
            CacheEvent::RecipeUpdated { .. } => "recipe_updated",
            CacheEvent::RecipeDeleted { .. } => "recipe_deleted",
            CacheEvent::ProfileUpdated => "profile_updated",
        }
    }

    // == Rules ==
    /// Entries to drop after this event.
    ///
    /// Review events without a resolvable recipe id fall back to whole
    /// prefixes instead of guessing the parent recipe.
    pub fn rules(&self) -> Vec<Rule> {
        match self {
            CacheEvent::ReviewCreated { recipe_id } => review_rules(Some(recipe_id.as_str())),
            CacheEvent::ReviewUpdated { recipe_id } | CacheEvent::ReviewDeleted { recipe_id } => {
                review_rules(crate::keys::non_empty_id(recipe_id.as_deref()))
            }
            CacheEvent::RecipeCreated => vec![Rule::prefix(Domain::RecipeList, RECIPE_LIST_PREFIX)],
            CacheEvent::RecipeUpdated { recipe_id } => vec![
                Rule::prefix(Domain::RecipeList, RECIPE_LIST_PREFIX),
                Rule::key(Domain::RecipeDetail, recipe_key(recipe_id)),
            ],
            CacheEvent::RecipeDeleted { recipe_id } => vec![
                Rule::prefix(Domain::RecipeList, RECIPE_LIST_PREFIX),
                Rule::key(Domain::RecipeDetail, recipe_key(recipe_id)),
                Rule::key(Domain::Reviews, reviews_key(recipe_id)),
            ],
            // Reviews carry the author's name and avatar.
            CacheEvent::ProfileUpdated => vec![Rule::prefix(Domain::Reviews, REVIEWS_PREFIX)],
        }
    }
}

fn review_rules(recipe_id: Option<&str>) -> Vec<Rule> {
    // List cards show the average rating as well.
    let list = Rule::prefix(Domain::RecipeList, RECIPE_LIST_PREFIX);
    match recipe_id {
        Some(id) => vec![
            Rule::key(Domain::RecipeDetail, recipe_key(id)),
            Rule::key(Domain::Reviews, reviews_key(id)),
            list,
        ],
        None => vec![
            Rule::prefix(Domain::RecipeDetail, RECIPE_PREFIX),
            Rule::prefix(Domain::Reviews, REVIEWS_PREFIX),
            list,
        ],
    }
}
