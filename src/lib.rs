//! Recipe Cache - read-through response cache for the recipe REST API
//!
//! Independent per-domain stores with lazy TTL expiry, a declared
//! invalidation table for writes, query state machines for callers, and an
//! HTTP gateway serving it all to the browser UI.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod hooks;
pub mod invalidation;
pub mod keys;
pub mod models;
pub mod transport;

pub use api::AppState;
pub use client::{Caches, FetchMode, RecipeClient};
pub use config::Config;
pub use error::{ClientError, Result};
pub use invalidation::CacheEvent;
