//! `AuthUser` extractor: the authorization gate in front of protected routes.
//!
//! Pulls the bearer token from the Authorization header, verifies it, and
//! injects the caller's context. The store is never consulted here.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use makerhub_core::error::AppError;
use makerhub_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Message for requests that carry no usable bearer token.
pub const MISSING_TOKEN: &str = "missing token";

/// Extracted authenticated caller context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The token from `Authorization: Bearer <token>`, if present and non-empty.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token =
            bearer_token(&parts.headers).ok_or_else(|| AppError::authentication(MISSING_TOKEN))?;

        let claims = state.jwt_decoder.decode(token)?;

        Ok(AuthUser(RequestContext::from_claims(claims)))
    }
}
