//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.

pub mod order;

use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::timeout::TimeoutLayer;

// Re-export key types for convenience
pub use order::{callback_router, site_router};
pub use order::OrderAppState;

/// Full application router: order endpoints plus a liveness probe.
///
/// `request_timeout` bounds the site endpoints only. The provider callback is
/// left unbounded so it is always acknowledged.
pub fn app_router(state: OrderAppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(site_router().layer(TimeoutLayer::new(request_timeout)))
        .merge(callback_router())
        .route("/health", get(health))
        .with_state(state)
}

/// GET /health - Liveness probe
async fn health() -> &'static str {
    "ok"
}
