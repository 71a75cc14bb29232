//! Per-domain stores.
//!
//! One independent store per payload type, each with its own TTL. Stores
//! share nothing; a rule from the invalidation table names the store it
//! applies to.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use tokio::sync::RwLock;
use tracing::info;

use super::inflight::InFlight;
use crate::cache::{CacheStats, CacheStore, Clock, SystemClock};
use crate::config::Config;
use crate::error::Result;
use crate::invalidation::{CacheEvent, Domain, Target};
use crate::models::{RecipeEnvelope, RecipePage, ReviewList, StoreStatsResponse};

/// A store shared between every caller of one domain.
pub type SharedStore<V> = Arc<RwLock<CacheStore<V>>>;

// == Domain Cache ==
/// A store plus its in-flight map.
///
/// Each method takes the store lock once and releases it before returning, so
/// no guard is ever held across a network await.
#[derive(Debug)]
pub struct DomainCache<V> {
    store: SharedStore<V>,
    inflight: InFlight<V>,
}

impl<V: Clone + Send + Sync + 'static> DomainCache<V> {
    pub fn new(store: CacheStore<V>) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            inflight: InFlight::new(),
        }
    }

    pub fn store(&self) -> &SharedStore<V> {
        &self.store
    }

    pub(crate) fn inflight(&self) -> &InFlight<V> {
        &self.inflight
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        // Write lock: a read may evict a stale entry and touches stats
        self.store.write().await.get(key)
    }

    pub async fn set(&self, key: &str, value: V) {
        self.store.write().await.set(key, value);
    }

    /// Wraps a network read so its payload is stored under `key` on success.
    ///
    /// The write happens inside the returned future, so whoever polls it to
    /// completion stores the result, not only the caller that started it.
    pub(crate) fn store_on_success(
        &self,
        key: &str,
        fetch: BoxFuture<'static, Result<V>>,
    ) -> BoxFuture<'static, Result<V>> {
        let store = self.store.clone();
        let key = key.to_string();
        async move {
            let result = fetch.await;
            if let Ok(payload) = &result {
                store.write().await.set(key, payload.clone());
            }
            result
        }
        .boxed()
    }

    pub async fn invalidate(&self, key: &str) -> bool {
        self.store.write().await.invalidate(key)
    }

    pub async fn invalidate_prefix(&self, prefix: &str) -> usize {
        self.store.write().await.invalidate_prefix(prefix)
    }

    /// Applies one rule target. Returns the number of entries dropped.
    pub async fn apply(&self, target: &Target) -> usize {
        let mut store = self.store.write().await;
        match target {
            Target::Key(key) => usize::from(store.invalidate(key)),
            Target::Prefix(prefix) => store.invalidate_prefix(prefix),
        }
    }

    pub async fn clear(&self) -> usize {
        self.store.write().await.clear()
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    async fn stats_response(&self) -> StoreStatsResponse {
        let store = self.store.read().await;
        StoreStatsResponse::new(store.name(), store.ttl().as_secs(), &store.stats())
    }
}

// == Caches ==
/// The three domain stores of the recipe client.
#[derive(Debug)]
pub struct Caches {
    pub recipes: DomainCache<RecipePage>,
    pub recipe: DomainCache<RecipeEnvelope>,
    pub reviews: DomainCache<ReviewList>,
}

impl Caches {
    pub fn new(
        recipes: CacheStore<RecipePage>,
        recipe: CacheStore<RecipeEnvelope>,
        reviews: CacheStore<ReviewList>,
    ) -> Self {
        Self {
            recipes: DomainCache::new(recipes),
            recipe: DomainCache::new(recipe),
            reviews: DomainCache::new(reviews),
        }
    }

    /// Builds all three stores from configuration with the given clock.
    pub fn from_config(config: &Config, clock: Arc<dyn Clock>) -> Self {
        let max = config.max_entries;
        Self::new(
            CacheStore::with_clock("recipes", config.recipes_ttl(), clock.clone()).with_capacity(max),
            CacheStore::with_clock("recipe", config.recipe_ttl(), clock.clone()).with_capacity(max),
            CacheStore::with_clock("reviews", config.reviews_ttl(), clock).with_capacity(max),
        )
    }

    pub fn with_system_clock(config: &Config) -> Self {
        Self::from_config(config, Arc::new(SystemClock))
    }

    // == Apply Event ==
    /// Runs every rule declared for `event`. Returns the total entries dropped.
    pub async fn apply(&self, event: &CacheEvent) -> usize {
        let mut removed = 0;
        for rule in event.rules() {
            removed += match rule.domain {
                Domain::RecipeList => self.recipes.apply(&rule.target).await,
                Domain::RecipeDetail => self.recipe.apply(&rule.target).await,
                Domain::Reviews => self.reviews.apply(&rule.target).await,
            };
        }
        removed
    }

    pub async fn clear(&self) -> usize {
        let removed =
            self.recipes.clear().await + self.recipe.clear().await + self.reviews.clear().await;
        info!("Cleared {} cached responses", removed);
        removed
    }

    pub async fn stats(&self) -> Vec<StoreStatsResponse> {
        vec![
            self.recipes.stats_response().await,
            self.recipe.stats_response().await,
            self.reviews.stats_response().await,
        ]
    }
}
