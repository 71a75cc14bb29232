//! Error types for the recipe client and gateway
//!
//! Provides unified error handling using thiserror. The cache layer itself
//! never fails; these describe network and application failures only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Client Error Enum ==
/// Failure of an upstream read or write.
///
/// `Clone` so one coalesced request can hand the same outcome to every waiter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Transport-level failure: connection, timeout, unreadable body
    #[error("Network failure: {0}")]
    Network(String),

    /// The upstream answered with `success: false`
    #[error("{0}")]
    Application(String),

    /// Rejected before reaching the upstream
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Message shown in a failed query state.
    pub fn message(&self) -> String {
        match self {
            ClientError::Network(msg) => format!("Network failure: {}", msg),
            ClientError::Application(msg) | ClientError::InvalidRequest(msg) => msg.clone(),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ClientError {
    fn into_response(self) -> Response {
        let status = match &self {
            ClientError::Network(_) => StatusCode::BAD_GATEWAY,
            ClientError::Application(_) => StatusCode::BAD_REQUEST,
            ClientError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        (status, Json(ErrorResponse::new(self.message()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
