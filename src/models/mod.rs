//! Request, response and record models
//!
//! Upstream envelope and records, plus the DTOs of the gateway's own
//! endpoints.

pub mod envelope;
pub mod records;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use envelope::{Envelope, PageInfo};
pub use records::{Recipe, RecipeEnvelope, RecipePage, Review, ReviewList};
pub use requests::{NewReview, ReadOptions, ReviewTarget};
pub use responses::{
    ErrorResponse, HealthResponse, InvalidationResponse, StatsResponse, StoreStatsResponse,
};
