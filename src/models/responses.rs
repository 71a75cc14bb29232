//! Response DTOs for the gateway's own endpoints.
//!
//! Upstream reads and writes answer with the upstream `Envelope` itself.

use serde::Serialize;

use crate::cache::CacheStats;

/// Per-store statistics (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StoreStatsResponse {
    pub name: &'static str,
    pub ttl_secs: u64,
    pub hits: u64,
    pub misses: u64,
    pub expirations: u64,
    pub evictions: u64,
    pub invalidations: u64,
    pub total_entries: usize,
    pub hit_rate: f64,
}

impl StoreStatsResponse {
    pub fn new(name: &'static str, ttl_secs: u64, stats: &CacheStats) -> Self {
        Self {
            name,
            ttl_secs,
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            evictions: stats.evictions,
            invalidations: stats.invalidations,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub stores: Vec<StoreStatsResponse>,
}

/// Response body for DELETE /cache and POST /profile/changed
#[derive(Debug, Clone, Serialize)]
pub struct InvalidationResponse {
    pub message: String,
    pub removed: usize,
}

impl InvalidationResponse {
    pub fn cleared(removed: usize) -> Self {
        Self {
            message: format!("Cleared {} cached responses", removed),
            removed,
        }
    }

    pub fn profile_changed(removed: usize) -> Self {
        Self {
            message: format!("Profile changed, dropped {} cached review lists", removed),
            removed,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error body, shaped like a failed envelope
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
