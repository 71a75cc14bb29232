//! Read sources: one per cached domain.
//!
//! A source knows its cache key, the store it reads through, and how to fetch
//! its payload from the network.

use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};

use super::caches::{Caches, DomainCache};
use crate::error::{ClientError, Result};
use crate::invalidation::Domain;
use crate::keys::{non_empty_id, recipe_key, recipe_list_key, reviews_key, RecipeParams};
use crate::models::{Envelope, RecipeEnvelope, RecipePage, ReviewList};
use crate::transport::{paths, Transport};

// == Source Trait ==
pub trait Source: Send + Sync {
    type Payload: Clone + Send + Sync + 'static;

    const DOMAIN: Domain;

    /// Message used when the upstream fails without saying why
    const FAILURE_MESSAGE: &'static str;

    /// Cache key for this request, `None` when the identifier is missing.
    fn cache_key(&self) -> Option<String>;

    fn cache(caches: &Caches) -> &DomainCache<Self::Payload>;

    /// Network read, detached from `self` so it can be shared between callers.
    fn fetch(&self, transport: Arc<dyn Transport>) -> BoxFuture<'static, Result<Self::Payload>>;
}

fn missing_id<T: Send + 'static>(domain: Domain) -> BoxFuture<'static, Result<T>> {
    let error = ClientError::InvalidRequest(format!(
        "missing recipe id for {} request",
        domain.as_str()
    ));
    future::ready(Err(error)).boxed()
}

// == Recipe List ==
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipesSource {
    pub params: RecipeParams,
}

impl RecipesSource {
    pub fn new(params: RecipeParams) -> Self {
        Self { params }
    }
}

impl Source for RecipesSource {
    type Payload = RecipePage;

    const DOMAIN: Domain = Domain::RecipeList;
    const FAILURE_MESSAGE: &'static str = "Failed to fetch recipes";

    fn cache_key(&self) -> Option<String> {
        Some(recipe_list_key(&self.params))
    }

    fn cache(caches: &Caches) -> &DomainCache<RecipePage> {
        &caches.recipes
    }

    fn fetch(&self, transport: Arc<dyn Transport>) -> BoxFuture<'static, Result<RecipePage>> {
        let query = self.params.to_query();
        async move {
            let body = transport.get(&paths::recipes(), &query).await?;
            Envelope::decode(body, Self::FAILURE_MESSAGE)
        }
        .boxed()
    }
}

// == Single Recipe ==
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeSource {
    pub recipe_id: Option<String>,
}

impl RecipeSource {
    pub fn new(recipe_id: impl Into<String>) -> Self {
        Self {
            recipe_id: Some(recipe_id.into()),
        }
    }

    fn id(&self) -> Option<&str> {
        non_empty_id(self.recipe_id.as_deref())
    }
}

impl Source for RecipeSource {
    type Payload = RecipeEnvelope;

    const DOMAIN: Domain = Domain::RecipeDetail;
    const FAILURE_MESSAGE: &'static str = "Failed to fetch recipe";

    fn cache_key(&self) -> Option<String> {
        self.id().map(recipe_key)
    }

    fn cache(caches: &Caches) -> &DomainCache<RecipeEnvelope> {
        &caches.recipe
    }

    fn fetch(&self, transport: Arc<dyn Transport>) -> BoxFuture<'static, Result<RecipeEnvelope>> {
        let Some(id) = self.id().map(str::to_string) else {
            return missing_id(Self::DOMAIN);
        };
        async move {
            let body = transport.get(&paths::recipe(&id), &[]).await?;
            Envelope::decode(body, Self::FAILURE_MESSAGE)
        }
        .boxed()
    }
}

// == Reviews ==
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewsSource {
    pub recipe_id: Option<String>,
}

impl ReviewsSource {
    pub fn new(recipe_id: impl Into<String>) -> Self {
        Self {
            recipe_id: Some(recipe_id.into()),
        }
    }

    fn id(&self) -> Option<&str> {
        non_empty_id(self.recipe_id.as_deref())
    }
}

impl Source for ReviewsSource {
    type Payload = ReviewList;

    const DOMAIN: Domain = Domain::Reviews;
    const FAILURE_MESSAGE: &'static str = "Failed to fetch reviews";

    fn cache_key(&self) -> Option<String> {
        self.id().map(reviews_key)
    }

    fn cache(caches: &Caches) -> &DomainCache<ReviewList> {
        &caches.reviews
    }

    fn fetch(&self, transport: Arc<dyn Transport>) -> BoxFuture<'static, Result<ReviewList>> {
        let Some(id) = self.id().map(str::to_string) else {
            return missing_id(Self::DOMAIN);
        };
        async move {
            let body = transport.get(&paths::recipe_reviews(&id), &[]).await?;
            Envelope::decode(body, Self::FAILURE_MESSAGE)
        }
        .boxed()
    }
}
