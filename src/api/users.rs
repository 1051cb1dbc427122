//! User administration endpoints

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::{CurrentUser, RequireAdmin};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::team::TeamId;
use crate::domain::user::{SystemRole, User};
use crate::infrastructure::{CreateUserInput, UpdateUserInput};

/// User representation safe to expose over the wire
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: SystemRole,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().as_str().to_string(),
            email: user.email().to_string(),
            name: user.name().to_string(),
            role: user.role(),
            active: user.is_active(),
            team_id: user.team_id().map(|t| t.as_str().to_string()),
            created_at: user.created_at().to_rfc3339(),
            updated_at: user.updated_at().to_rfc3339(),
        }
    }
}

/// List users response
#[derive(Debug, Serialize)]
pub struct ListUsersResponse {
    pub users: Vec<UserResponse>,
    pub total: usize,
}

impl ListUsersResponse {
    fn from_users(users: &[User]) -> Self {
        let users: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
        let total = users.len();
        Self { users, total }
    }
}

/// Request to create a user
#[derive(Debug, Deserialize)]
pub struct CreateUserApiRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub role: SystemRole,
    #[serde(default)]
    pub team_id: Option<String>,
}

/// Request to update a user
#[derive(Debug, Deserialize)]
pub struct UpdateUserApiRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<SystemRole>,
    pub active: Option<bool>,
}

/// GET /users - active members of the caller's team
pub async fn list_team_members(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ListUsersResponse>, ApiError> {
    let members = match user.team_id() {
        Some(team_id) => state
            .user_service
            .team_members(team_id)
            .await
            .map_err(ApiError::from)?,
        None => Vec::new(),
    };

    Ok(Json(ListUsersResponse::from_users(&members)))
}

/// GET /users/all - every user on the platform, super-admin only
pub async fn list_all_users(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ListUsersResponse>, ApiError> {
    if !user.role().can_view_all_users() {
        return Err(ApiError::forbidden("Super administrator access required"));
    }

    let users = state.user_service.list_all().await.map_err(ApiError::from)?;

    Ok(Json(ListUsersResponse::from_users(&users)))
}

/// POST /users - create a user, admin only
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(request): Json<CreateUserApiRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    debug!(email = %request.email, "Admin creating user");

    let team_id = match request.team_id {
        Some(id) => Some(TeamId::new(id).map_err(|e| ApiError::bad_request(e.to_string()))?),
        None => None,
    };

    let user = state
        .user_service
        .create(
            CreateUserInput {
                email: request.email,
                name: request.name,
                password: request.password,
                role: request.role,
                team_id,
            },
            admin.id(),
        )
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .user_service
        .get(&user_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("User '{}' not found", user_id)))?;

    Ok(Json(UserResponse::from(&user)))
}

/// PUT /users/{id} - update profile, role or status, admin only
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(user_id): Path<String>,
    Json(request): Json<UpdateUserApiRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(user = %user_id, "Admin updating user");

    let user = state
        .user_service
        .update(
            &user_id,
            UpdateUserInput {
                name: request.name,
                email: request.email,
                role: request.role,
                active: request.active,
            },
            admin.id(),
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /users/{id} - soft delete, admin only
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(user = %user_id, "Admin deactivating user");

    let user = state
        .user_service
        .deactivate(&user_id, admin.id())
        .await
        .map_err(ApiError::from)?;

    Ok(Json(UserResponse::from(&user)))
}
