//! Request DTOs for the gateway API

use serde::{Deserialize, Serialize};

/// Body of a review create or update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub user_identifier: String,
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl NewReview {
    /// Validates the review before it is sent upstream.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.user_identifier.trim().is_empty() {
            return Some("User identifier cannot be empty".to_string());
        }
        if !(1..=5).contains(&self.rating) {
            return Some("Rating must be between 1 and 5".to_string());
        }
        None
    }
}

/// `?refresh=true` bypasses the cache for a single read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReadOptions {
    #[serde(default)]
    pub refresh: bool,
}

/// Optional parent recipe of a review addressed by review id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewTarget {
    #[serde(default)]
    pub recipe_id: Option<String>,
}
