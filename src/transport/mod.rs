//! Transport Module
//!
//! The network collaborator: four verbs against the upstream REST API, each
//! answering with the raw JSON envelope.

mod http;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub use http::HttpTransport;

// == Transport Trait ==
/// Opaque `get/post/put/delete` capability.
///
/// Implementations return the upstream body as-is; envelope decoding and
/// `success: false` handling happen in the client.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value>;

    async fn post(&self, path: &str, body: Value) -> Result<Value>;

    async fn put(&self, path: &str, body: Value) -> Result<Value>;

    async fn delete(&self, path: &str) -> Result<Value>;
}

// == Upstream Paths ==
pub mod paths {
    pub fn recipes() -> String {
        "/api/v1/recipes".to_string()
    }

    pub fn recipe(recipe_id: &str) -> String {
        format!("/api/v1/recipes/{}", recipe_id)
    }

    pub fn recipe_reviews(recipe_id: &str) -> String {
        format!("/api/v1/recipes/{}/reviews", recipe_id)
    }

    pub fn review(review_id: &str) -> String {
        format!("/api/v1/reviews/{}", review_id)
    }
}
