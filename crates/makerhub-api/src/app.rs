//! Application builder: wires router, middleware, and state into an Axum app.

use std::time::Duration;

use axum::Router;
use axum::extract::Request;
use axum::middleware as axum_middleware;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::{redact_path, request_logging};
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let server = state.config.server.clone();

    build_router(state)
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_seconds,
        )))
        .layer(build_cors_layer(&server.cors))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(axum_middleware::from_fn(request_logging))
}

/// Span for one request. The full URI is never recorded.
fn request_span(request: &Request) -> Span {
    tracing::debug_span!(
        "request",
        method = %request.method(),
        path = %redact_path(request.uri().path()),
    )
}
