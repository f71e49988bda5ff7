//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET|POST /shorten`     - Create a short link from the `url` parameter
//! - `GET  /shorten/{*url}`  - Create a short link from the path
//! - `GET  /info/{code}`     - Record of a short link as JSON
//! - `GET  /latest[/{n}]`    - Newest records as JSON
//! - `GET  /health`          - Health check: backend and click queue
//! - `/urllist/*`            - Static front-end files
//! - `GET  /{code}`          - Short link redirect, `/{code}+` shows the record
//!
//! Fixed routes win over `/{code}`; the counter never hands out a code equal
//! to one of their names.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{
    health_handler, info_handler, latest_count_handler, latest_handler, redirect_handler,
    shorten_handler, shorten_path_handler,
};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use std::path::Path;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Builds the router with all routes and the tracing layer applied.
///
/// `static_dir` is served under `/urllist`.
pub fn router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/shorten", get(shorten_handler).post(shorten_handler))
        .route("/shorten/{*url}", get(shorten_path_handler))
        .route("/info/{code}", get(info_handler))
        .route("/latest", get(latest_handler))
        .route("/latest/{n}", get(latest_count_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .nest_service("/urllist", ServeDir::new(static_dir))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application with trailing slashes trimmed before routing.
pub fn app_router(state: AppState, static_dir: impl AsRef<Path>) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, static_dir))
}
