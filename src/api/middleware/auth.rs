//! Session authentication extractors
//!
//! Clients present the opaque session token via
//! `Authorization: Bearer <token>`. The token resolves to a user through
//! the auth service; absent, expired, or deactivated identities reject
//! with 401 before the handler runs.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::audit::RequestOrigin;
use crate::domain::user::User;

/// Extractor that requires a valid session
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_session_token(&parts.headers)?;

        debug!("Resolving session token");

        let user = state
            .auth_service
            .session_user(&token)
            .await
            .map_err(|e| ApiError::internal(e.to_string()))?
            .ok_or_else(|| ApiError::unauthorized("Invalid or expired session"))?;

        Ok(CurrentUser(user))
    }
}

/// Extractor that additionally requires an admin system role
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub User);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        if !user.role().is_admin() {
            return Err(ApiError::forbidden("Administrator access required"));
        }

        Ok(RequireAdmin(user))
    }
}

/// Extract the opaque session token from the Authorization header
pub fn extract_session_token(headers: &HeaderMap) -> Result<String, ApiError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| ApiError::bad_request("Invalid Authorization header encoding"))?;

        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(token.trim().to_string());
        }
    }

    Err(ApiError::unauthorized(
        "Authentication required. Provide a session token via 'Authorization: Bearer <token>'",
    ))
}

/// Capture request origin metadata for audit entries
pub fn request_origin(headers: &HeaderMap) -> RequestOrigin {
    let ip_address = headers
        .get("x-forwarded-for")
        .or_else(|| headers.get("x-real-ip"))
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(',').next().unwrap_or(v).trim().to_string());

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    RequestOrigin::new(ip_address, user_agent)
}
