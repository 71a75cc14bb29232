//! API Routes
//!
//! Configures the Axum router with all gateway endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, create_recipe_handler, create_review_handler, delete_recipe_handler,
    delete_review_handler, get_recipe_handler, health_handler, list_recipes_handler,
    list_reviews_handler, profile_changed_handler, stats_handler, update_recipe_handler,
    update_review_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /recipes`, `POST /recipes`
/// - `GET|PUT|DELETE /recipes/:id`
/// - `GET|POST /recipes/:id/reviews`
/// - `PUT|DELETE /reviews/:id`
/// - `POST /profile/changed`
/// - `GET /stats`, `DELETE /cache`, `GET /health`
///
/// # Middleware
/// - CORS: the browser UI calls the gateway from its own origin
/// - Tracing: logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/recipes", get(list_recipes_handler).post(create_recipe_handler))
        .route(
            "/recipes/:id",
            get(get_recipe_handler)
                .put(update_recipe_handler)
                .delete(delete_recipe_handler),
        )
        .route(
            "/recipes/:id/reviews",
            get(list_reviews_handler).post(create_review_handler),
        )
        .route(
            "/reviews/:id",
            put(update_review_handler).delete(delete_review_handler),
        )
        .route("/profile/changed", post(profile_changed_handler))
        .route("/stats", get(stats_handler))
        .route("/cache", delete(clear_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
