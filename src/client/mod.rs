//! Client Module
//!
//! Read-through access to the upstream API and the writes that invalidate it.
//!
//! Reads check the domain store first and only go to the network on a miss.
//! Writes go straight to the network and, once the upstream confirms them,
//! drop every cached entry the invalidation table names for the event.

mod caches;
mod inflight;
mod sources;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::invalidation::CacheEvent;
use crate::keys::{non_empty_id, RecipeParams};
use crate::models::{
    Envelope, NewReview, Recipe, RecipeEnvelope, RecipePage, Review, ReviewList,
};
use crate::transport::{paths, Transport};

pub use caches::{Caches, DomainCache, SharedStore};
pub use inflight::{InFlight, PendingFetch};
pub use sources::{RecipeSource, RecipesSource, ReviewsSource, Source};

// == Fetch Mode ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    /// Serve a valid cached entry, fetch on miss
    #[default]
    Cached,
    /// Skip the store, always fetch, overwrite the entry on success
    Refresh,
}

impl FetchMode {
    pub fn from_refresh(refresh: bool) -> Self {
        if refresh {
            FetchMode::Refresh
        } else {
            FetchMode::Cached
        }
    }
}

// == Recipe Client ==
/// Upstream API access through the per-domain caches.
pub struct RecipeClient {
    transport: Arc<dyn Transport>,
    caches: Caches,
    coalesce: bool,
}

impl RecipeClient {
    pub fn new(transport: Arc<dyn Transport>, caches: Caches) -> Self {
        Self {
            transport,
            caches,
            coalesce: false,
        }
    }

    /// Client with wall-clock stores sized and timed from `config`.
    pub fn from_config(config: &Config, transport: Arc<dyn Transport>) -> Self {
        Self::new(transport, Caches::with_system_clock(config))
            .with_coalescing(config.coalesce_requests)
    }

    /// Collapses concurrent identical misses into one upstream call.
    pub fn with_coalescing(mut self, enabled: bool) -> Self {
        self.coalesce = enabled;
        self
    }

    pub fn caches(&self) -> &Caches {
        &self.caches
    }

    pub fn coalesces(&self) -> bool {
        self.coalesce
    }

    // == Cached ==
    /// The valid cached payload for `source`, if any. Never touches the network.
    pub async fn cached<S: Source>(&self, source: &S) -> Option<S::Payload> {
        let key = source.cache_key()?;
        S::cache(&self.caches).get(&key).await
    }

    // == Fetch ==
    /// Reads `source` from the network and stores the payload on success.
    ///
    /// With coalescing on, a `Cached` miss joins an unfinished fetch for the
    /// same key while a `Refresh` always starts its own. Failures are
    /// returned as-is and never cached.
    pub async fn fetch<S: Source>(&self, source: &S, mode: FetchMode) -> Result<S::Payload> {
        let key = source.cache_key().ok_or_else(|| {
            ClientError::InvalidRequest(format!(
                "missing recipe id for {} request",
                S::DOMAIN.as_str()
            ))
        })?;
        let cache = S::cache(&self.caches);
        let start = || cache.store_on_success(&key, source.fetch(self.transport.clone()));

        let result = if self.coalesce {
            let inflight = cache.inflight();
            let pending = match mode {
                FetchMode::Cached => {
                    let (pending, leader) = inflight.join_or_start(&key, start);
                    if !leader {
                        debug!(key = %key, "joined in-flight request");
                        return pending.await;
                    }
                    pending
                }
                FetchMode::Refresh => inflight.start(&key, start),
            };
            // A handle that polled to completion no longer matches in `finish`
            let result = pending.clone().await;
            inflight.finish(&key, &pending);
            result
        } else {
            start().await
        };

        if let Err(e) = &result {
            warn!(key = %key, error = %e, "upstream read failed");
        }
        result
    }

    // == Read ==
    /// Read-through entry point.
    ///
    /// `Ok(None)` means the source had no identifier: neither the store nor
    /// the network was consulted.
    pub async fn read<S: Source>(&self, source: &S, mode: FetchMode) -> Result<Option<S::Payload>> {
        if source.cache_key().is_none() {
            debug!(domain = S::DOMAIN.as_str(), "empty identifier, skipping read");
            return Ok(None);
        }

        if mode == FetchMode::Cached {
            if let Some(hit) = self.cached(source).await {
                return Ok(Some(hit));
            }
        }

        self.fetch(source, mode).await.map(Some)
    }

    pub async fn recipes(&self, params: &RecipeParams, mode: FetchMode) -> Result<RecipePage> {
        let source = RecipesSource::new(params.clone());
        self.read(&source, mode).await?.ok_or_else(|| {
            ClientError::InvalidRequest("recipe list request has no cache key".to_string())
        })
    }

    pub async fn recipe(&self, recipe_id: &str, mode: FetchMode) -> Result<Option<RecipeEnvelope>> {
        self.read(&RecipeSource::new(recipe_id), mode).await
    }

    pub async fn reviews(&self, recipe_id: &str, mode: FetchMode) -> Result<Option<ReviewList>> {
        self.read(&ReviewsSource::new(recipe_id), mode).await
    }

    // == Review Writes ==
    pub async fn create_review(&self, recipe_id: &str, review: &NewReview) -> Result<Envelope<Review>> {
        let recipe_id = require_id(Some(recipe_id), "recipe")?;
        validate_review(review)?;

        let raw = self
            .transport
            .post(&paths::recipe_reviews(recipe_id), to_body(review)?)
            .await?;
        self.commit(
            raw,
            "Failed to create review",
            CacheEvent::ReviewCreated {
                recipe_id: recipe_id.to_string(),
            },
        )
        .await
    }

    /// Updates a review addressed by its own id. Without `recipe_id` the
    /// parent recipe is unknown and whole key families are dropped.
    pub async fn update_review(
        &self,
        review_id: &str,
        review: &NewReview,
        recipe_id: Option<&str>,
    ) -> Result<Envelope<Review>> {
        let review_id = require_id(Some(review_id), "review")?;
        validate_review(review)?;

        let raw = self
            .transport
            .put(&paths::review(review_id), to_body(review)?)
            .await?;
        self.commit(
            raw,
            "Failed to update review",
            CacheEvent::ReviewUpdated {
                recipe_id: non_empty_id(recipe_id).map(str::to_string),
            },
        )
        .await
    }

    pub async fn delete_review(&self, review_id: &str, recipe_id: Option<&str>) -> Result<Envelope<Value>> {
        let review_id = require_id(Some(review_id), "review")?;

        let raw = self.transport.delete(&paths::review(review_id)).await?;
        self.commit(
            raw,
            "Failed to delete review",
            CacheEvent::ReviewDeleted {
                recipe_id: non_empty_id(recipe_id).map(str::to_string),
            },
        )
        .await
    }

    // == Recipe Writes ==
    pub async fn create_recipe(&self, recipe: &Value) -> Result<Envelope<Recipe>> {
        require_object(recipe)?;

        let raw = self.transport.post(&paths::recipes(), recipe.clone()).await?;
        self.commit(raw, "Failed to create recipe", CacheEvent::RecipeCreated)
            .await
    }

    pub async fn update_recipe(&self, recipe_id: &str, recipe: &Value) -> Result<Envelope<Recipe>> {
        let recipe_id = require_id(Some(recipe_id), "recipe")?;
        require_object(recipe)?;

        let raw = self
            .transport
            .put(&paths::recipe(recipe_id), recipe.clone())
            .await?;
        self.commit(
            raw,
            "Failed to update recipe",
            CacheEvent::RecipeUpdated {
                recipe_id: recipe_id.to_string(),
            },
        )
        .await
    }

    pub async fn delete_recipe(&self, recipe_id: &str) -> Result<Envelope<Value>> {
        let recipe_id = require_id(Some(recipe_id), "recipe")?;

        let raw = self.transport.delete(&paths::recipe(recipe_id)).await?;
        self.commit(
            raw,
            "Failed to delete recipe",
            CacheEvent::RecipeDeleted {
                recipe_id: recipe_id.to_string(),
            },
        )
        .await
    }

    // == Profile ==
    /// The user's avatar or username changed. Profile data lives in its own
    /// store; only the cached reviews showing it are dropped here.
    pub async fn profile_updated(&self) -> usize {
        let event = CacheEvent::ProfileUpdated;
        let removed = self.caches.apply(&event).await;
        info!(event = event.name(), removed, "cache invalidated");
        removed
    }

    // == Commit ==
    /// Decodes a write response and, if the upstream accepted it, applies the
    /// event's invalidation rules.
    ///
    /// Acceptance is judged on the bare envelope. The payload is typed only
    /// after the cache has been invalidated, so an unexpected record shape
    /// never leaves stale entries behind.
    async fn commit<T: DeserializeOwned>(
        &self,
        raw: Value,
        fallback: &str,
        event: CacheEvent,
    ) -> Result<Envelope<T>> {
        let accepted = Envelope::<Value>::decode(raw, fallback).map_err(|e| {
            warn!(event = event.name(), error = %e, "upstream rejected write");
            e
        })?;

        let removed = self.caches.apply(&event).await;
        info!(event = event.name(), removed, "write committed, cache invalidated");

        accepted.into_typed().map_err(|e| {
            warn!(event = event.name(), error = %e, "unreadable write response");
            e
        })
    }
}

fn require_id<'a>(id: Option<&'a str>, what: &str) -> Result<&'a str> {
    non_empty_id(id).ok_or_else(|| ClientError::InvalidRequest(format!("{} id cannot be empty", what)))
}

fn validate_review(review: &NewReview) -> Result<()> {
    match review.validate() {
        Some(message) => Err(ClientError::InvalidRequest(message)),
        None => Ok(()),
    }
}

fn require_object(body: &Value) -> Result<()> {
    if body.is_object() {
        Ok(())
    } else {
        Err(ClientError::InvalidRequest(
            "Recipe body must be a JSON object".to_string(),
        ))
    }
}

fn to_body<T: Serialize>(body: &T) -> Result<Value> {
    serde_json::to_value(body).map_err(|e| ClientError::InvalidRequest(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_mode_from_refresh() {
        assert_eq!(FetchMode::from_refresh(true), FetchMode::Refresh);
        assert_eq!(FetchMode::from_refresh(false), FetchMode::Cached);
        assert_eq!(FetchMode::default(), FetchMode::Cached);
    }

    #[test]
    fn test_require_id() {
        assert_eq!(require_id(Some(" 42 "), "recipe"), Ok("42"));
        assert!(matches!(
            require_id(Some(""), "review"),
            Err(ClientError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_require_object() {
        assert!(require_object(&serde_json::json!({"name": "Es Teh"})).is_ok());
        assert!(require_object(&serde_json::json!([1, 2])).is_err());
    }
}
