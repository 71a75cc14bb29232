//! API Module
//!
//! HTTP surface of the caching gateway. The browser UI talks to these routes;
//! the gateway reads through its stores and forwards the rest upstream.

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
