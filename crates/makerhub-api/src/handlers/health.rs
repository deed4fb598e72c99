//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let reachable = matches!(
        tokio::time::timeout(state.store_timeout(), state.store.health_check()).await,
        Ok(Ok(true))
    );

    let (status, store) = if reachable {
        ("ok", "connected")
    } else {
        tracing::warn!("Health check could not reach the makerspace store");
        ("degraded", "unavailable")
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: store.to_string(),
    })
}
