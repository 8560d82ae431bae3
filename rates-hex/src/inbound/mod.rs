//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the rate service.

mod handlers;
mod rate_limit;
mod server;

pub use handlers::AppState;
pub use rate_limit::{DEFAULT_REFRESHES_PER_MINUTE, RateLimiterState};
pub use server::HttpServer;
