//! Route definitions for the MakerHub HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::Router;
use axum::routing::{get, post};

use crate::handlers;
use crate::state::AppState;

/// Build the API router with all routes and shared state.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(makerspace_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Onboarding, finalization and directory endpoints
fn makerspace_routes() -> Router<AppState> {
    Router::new()
        .route("/makerspace", post(handlers::makerspace::finalize))
        .route("/makerspace/", post(handlers::makerspace::finalize))
        .route("/makerspace/onboard", post(handlers::makerspace::onboard))
        .route(
            "/makerspace/verify/{token}",
            get(handlers::makerspace::verify_claim),
        )
        .route(
            "/makerspace/by-name/{name}",
            get(handlers::makerspace::get_by_name),
        )
        .route(
            "/makerspace/by-city/{city}",
            get(handlers::makerspace::names_in_city),
        )
        .route(
            "/makerspace/{id}",
            get(handlers::makerspace::get_makerspace).put(handlers::makerspace::update_makerspace),
        )
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
