//! API Handlers
//!
//! HTTP request handlers for each gateway endpoint. Reads go through the
//! client's caches; writes go upstream and invalidate.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;

use crate::client::{FetchMode, RecipeClient};
use crate::error::{ClientError, Result};
use crate::keys::RecipeParams;
use crate::models::{
    Envelope, HealthResponse, InvalidationResponse, NewReview, ReadOptions, Recipe,
    RecipeEnvelope, RecipePage, Review, ReviewList, ReviewTarget, StatsResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<RecipeClient>,
}

impl AppState {
    pub fn new(client: RecipeClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

/// Pulls the gateway's own `refresh` flag out of the list query.
fn take_refresh(query: &mut BTreeMap<String, String>) -> bool {
    query
        .remove("refresh")
        .map(|v| matches!(v.as_str(), "true" | "1"))
        .unwrap_or(false)
}

fn missing_recipe() -> ClientError {
    ClientError::InvalidRequest("recipe id cannot be empty".to_string())
}

// == Reads ==

/// Handler for GET /recipes
pub async fn list_recipes_handler(
    State(state): State<AppState>,
    Query(mut query): Query<BTreeMap<String, String>>,
) -> Result<Json<RecipePage>> {
    let mode = FetchMode::from_refresh(take_refresh(&mut query));
    let params: RecipeParams = query.into_iter().collect();

    let page = state.client.recipes(&params, mode).await?;
    Ok(Json(page))
}

/// Handler for GET /recipes/:id
pub async fn get_recipe_handler(
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
    Query(options): Query<ReadOptions>,
) -> Result<Json<RecipeEnvelope>> {
    let mode = FetchMode::from_refresh(options.refresh);
    let recipe = state.client.recipe(&recipe_id, mode).await?;
    recipe.map(Json).ok_or_else(missing_recipe)
}

/// Handler for GET /recipes/:id/reviews
pub async fn list_reviews_handler(
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
    Query(options): Query<ReadOptions>,
) -> Result<Json<ReviewList>> {
    let mode = FetchMode::from_refresh(options.refresh);
    let reviews = state.client.reviews(&recipe_id, mode).await?;
    reviews.map(Json).ok_or_else(missing_recipe)
}

// == Review Writes ==

/// Handler for POST /recipes/:id/reviews
pub async fn create_review_handler(
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
    Json(review): Json<NewReview>,
) -> Result<Json<Envelope<Review>>> {
    let created = state.client.create_review(&recipe_id, &review).await?;
    Ok(Json(created))
}

/// Handler for PUT /reviews/:id
pub async fn update_review_handler(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
    Query(target): Query<ReviewTarget>,
    Json(review): Json<NewReview>,
) -> Result<Json<Envelope<Review>>> {
    let updated = state
        .client
        .update_review(&review_id, &review, target.recipe_id.as_deref())
        .await?;
    Ok(Json(updated))
}

/// Handler for DELETE /reviews/:id
pub async fn delete_review_handler(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
    Query(target): Query<ReviewTarget>,
) -> Result<Json<Envelope<Value>>> {
    let deleted = state
        .client
        .delete_review(&review_id, target.recipe_id.as_deref())
        .await?;
    Ok(Json(deleted))
}

// == Recipe Writes ==

/// Handler for POST /recipes
pub async fn create_recipe_handler(
    State(state): State<AppState>,
    Json(recipe): Json<Value>,
) -> Result<Json<Envelope<Recipe>>> {
    let created = state.client.create_recipe(&recipe).await?;
    Ok(Json(created))
}

/// Handler for PUT /recipes/:id
pub async fn update_recipe_handler(
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
    Json(recipe): Json<Value>,
) -> Result<Json<Envelope<Recipe>>> {
    let updated = state.client.update_recipe(&recipe_id, &recipe).await?;
    Ok(Json(updated))
}

/// Handler for DELETE /recipes/:id
pub async fn delete_recipe_handler(
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
) -> Result<Json<Envelope<Value>>> {
    let deleted = state.client.delete_recipe(&recipe_id).await?;
    Ok(Json(deleted))
}

// == Cache Administration ==

/// Handler for POST /profile/changed
pub async fn profile_changed_handler(State(state): State<AppState>) -> Json<InvalidationResponse> {
    let removed = state.client.profile_updated().await;
    Json(InvalidationResponse::profile_changed(removed))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stores = state.client.caches().stats().await;
    Json(StatsResponse { stores })
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<InvalidationResponse> {
    let removed = state.client.caches().clear().await;
    Json(InvalidationResponse::cleared(removed))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
