//! Makerspace handlers: onboarding, claim verification, finalization, and
//! directory lookups.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::Value;
use validator::Validate;

use makerhub_service::makerspace::ClaimVerification;

use crate::dto::request::{OnboardRequest, validation_failed};
use crate::dto::response::{MakerspaceResponse, OnboardResponse};
use crate::error::ApiResult;
use crate::extractors::path::parse_uuid;
use crate::extractors::{AuthUser, JsonBody};
use crate::state::AppState;

/// POST /api/makerspace/onboard
pub async fn onboard(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<OnboardRequest>,
) -> ApiResult<(StatusCode, Json<OnboardResponse>)> {
    let req = req.trimmed();
    req.validate().map_err(|e| validation_failed(&e))?;

    let ticket = state.onboarding.begin_onboarding(&req.email).await?;

    Ok((StatusCode::CREATED, Json(OnboardResponse::from(ticket))))
}

/// GET /api/makerspace/verify/{token}
pub async fn verify_claim(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> ApiResult<(StatusCode, Json<ClaimVerification>)> {
    let verification = state.onboarding.verify_claim(&token).await?;

    let status = if verification.is_valid {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    Ok((status, Json(verification)))
}

/// POST /api/makerspace
pub async fn finalize(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(payload): JsonBody<Value>,
) -> ApiResult<(StatusCode, Json<MakerspaceResponse>)> {
    let active = state.finalizer.finalize(auth.context(), &payload).await?;
    Ok((StatusCode::CREATED, Json(MakerspaceResponse::from(active))))
}

/// GET /api/makerspace/{id}
pub async fn get_makerspace(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MakerspaceResponse>> {
    let id = parse_uuid(&id)?;
    let makerspace = state.directory.get(id).await?;
    Ok(Json(MakerspaceResponse::from(makerspace)))
}

/// GET /api/makerspace/by-name/{name}
pub async fn get_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<MakerspaceResponse>> {
    let makerspace = state.directory.get_by_name(&name).await?;
    Ok(Json(MakerspaceResponse::from(makerspace)))
}

/// GET /api/makerspace/by-city/{city}
pub async fn names_in_city(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.directory.names_in_city(&city).await?))
}

/// PUT /api/makerspace/{id}
pub async fn update_makerspace(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<Value>,
) -> ApiResult<Json<MakerspaceResponse>> {
    let id = parse_uuid(&id)?;
    let updated = state.directory.update(auth.context(), id, &patch).await?;
    Ok(Json(MakerspaceResponse::from(updated)))
}
