//! Authentication endpoints
//!
//! Signup and login are rate limited per client identity; everything else
//! rides on the session token.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{extract_session_token, request_origin, CurrentUser};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::api::users::UserResponse;
use crate::infrastructure::{client_identifier, SignupInput};

/// Signup request
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
    pub user: UserResponse,
}

/// Session response
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: UserResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<SessionTeam>,
    /// Teams this user created and therefore manages
    pub created_teams: Vec<SessionTeam>,
}

/// A team summary embedded in the session response
#[derive(Debug, Serialize)]
pub struct SessionTeam {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&crate::domain::team::Team> for SessionTeam {
    fn from(team: &crate::domain::team::Team) -> Self {
        Self {
            id: team.id().as_str().to_string(),
            name: team.name().to_string(),
            description: team.description().map(String::from),
        }
    }
}

/// Logout response
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

async fn enforce_auth_rate_limit(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let identity = client_identifier(headers);
    let verdict = state.auth_rate_limiter.check(&identity).await;

    if !verdict.allowed {
        return Err(ApiError::rate_limited(format!(
            "Too many attempts. Try again in {} seconds",
            verdict.reset_in_seconds
        )));
    }

    Ok(())
}

/// POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    enforce_auth_rate_limit(&state, &headers).await?;

    let user = state
        .auth_service
        .signup(SignupInput {
            email: request.email,
            password: request.password,
            name: request.name,
        })
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    enforce_auth_rate_limit(&state, &headers).await?;

    let outcome = state
        .auth_service
        .login(&request.email, &request.password, request_origin(&headers))
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    Ok(Json(LoginResponse {
        token: outcome.session.token().as_str().to_string(),
        expires_at: outcome.session.expires_at().to_rfc3339(),
        user: UserResponse::from(&outcome.user),
    }))
}

/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LogoutResponse>, ApiError> {
    let token = extract_session_token(&headers)?;

    state
        .auth_service
        .logout(&token, request_origin(&headers))
        .await
        .map_err(ApiError::from)?;

    Ok(Json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    }))
}

/// GET /auth/session - the resolved identity behind the presented token
pub async fn session(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<SessionResponse>, ApiError> {
    let team = match user.team_id() {
        Some(team_id) => state
            .team_service
            .get(team_id.as_str())
            .await
            .map_err(ApiError::from)?
            .as_ref()
            .map(SessionTeam::from),
        None => None,
    };

    let created_teams = state
        .team_service
        .created_by(user.id())
        .await
        .map_err(ApiError::from)?
        .iter()
        .map(SessionTeam::from)
        .collect();

    Ok(Json(SessionResponse {
        user: UserResponse::from(&user),
        team,
        created_teams,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_deserialization() {
        let json = r#"{
            "email": "carlos@empresa.com",
            "password": "secret-password",
            "name": "Carlos"
        }"#;

        let request: SignupRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.email, "carlos@empresa.com");
        assert_eq!(request.name, "Carlos");
    }

    #[test]
    fn test_login_request_deserialization() {
        let json = r#"{"email": "carlos@empresa.com", "password": "secret-password"}"#;

        let request: LoginRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.email, "carlos@empresa.com");
    }

    #[test]
    fn test_session_response_omits_missing_team() {
        use crate::domain::user::{SystemRole, User, UserId};

        let user = User::new(
            UserId::new("carlos").unwrap(),
            "carlos@empresa.com",
            "Carlos",
            "hash",
            SystemRole::User,
        );

        let response = SessionResponse {
            user: UserResponse::from(&user),
            team: None,
            created_teams: vec![],
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("\"team\":"));
        assert!(json.contains("\"created_teams\":[]"));
    }
}
