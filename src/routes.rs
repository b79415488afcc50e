//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /open/{token}`  - Open tracking pixel (always `200 image/png`)
//! - `GET /click/{token}` - Click tracking redirect (`307`, or `404`)
//! - `GET /health`        - Health check: event queue, encryption
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling, so URLs generated with
//!   `APPEND_SLASH` resolve to the same handlers

use crate::api::handlers::{click_handler, health_handler, open_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// The open and click paths are fixed; the public base tracking URLs must
/// point at them (e.g. `https://t.example.com/open/`).
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/open/{token}", get(open_handler))
        .route("/click/{token}", get(click_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
