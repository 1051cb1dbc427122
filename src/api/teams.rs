//! Team endpoints - listing, creation, detail, and team-scoped
//! request/invite/role management

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::CurrentUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::api::users::UserResponse;
use crate::domain::role::{RoleId, TeamRole};
use crate::domain::team::{Team, TeamId};
use crate::domain::user::UserId;
use crate::infrastructure::{CreateRoleInput, CreateTeamInput};

use super::invites::InviteResponse;
use super::requests::RequestResponse;

/// Team representation over the wire
#[derive(Debug, Clone, Serialize)]
pub struct TeamResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: String,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id().as_str().to_string(),
            name: team.name().to_string(),
            description: team.description().map(String::from),
            status: team.status().to_string(),
            created_by: team.created_by().as_str().to_string(),
            created_at: team.created_at().to_rfc3339(),
            updated_at: team.updated_at().to_rfc3339(),
        }
    }
}

/// Role representation over the wire
#[derive(Debug, Clone, Serialize)]
pub struct RoleResponse {
    pub id: String,
    pub team_id: String,
    pub name: String,
    pub color: String,
    pub active: bool,
}

impl From<&TeamRole> for RoleResponse {
    fn from(role: &TeamRole) -> Self {
        Self {
            id: role.id().as_str().to_string(),
            team_id: role.team_id().as_str().to_string(),
            name: role.name().to_string(),
            color: role.color().to_string(),
            active: role.is_active(),
        }
    }
}

/// List teams response
#[derive(Debug, Serialize)]
pub struct ListTeamsResponse {
    pub teams: Vec<TeamResponse>,
    pub total: usize,
}

/// Team detail with members and roles
#[derive(Debug, Serialize)]
pub struct TeamDetailResponse {
    #[serde(flatten)]
    pub team: TeamResponse,
    pub members: Vec<UserResponse>,
    pub roles: Vec<RoleResponse>,
}

/// Request to create a team
#[derive(Debug, Deserialize)]
pub struct CreateTeamApiRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request to create a team role
#[derive(Debug, Deserialize)]
pub struct CreateRoleApiRequest {
    pub name: String,
    #[serde(default = "default_role_color")]
    pub color: String,
}

fn default_role_color() -> String {
    "#6B7280".to_string()
}

/// Request to assign a role
#[derive(Debug, Deserialize)]
pub struct AssignRoleApiRequest {
    pub user_id: String,
}

fn parse_team_id(id: &str) -> Result<TeamId, ApiError> {
    TeamId::new(id).map_err(|e| ApiError::bad_request(e.to_string()))
}

async fn require_management(
    state: &AppState,
    actor: &UserId,
    team_id: &TeamId,
) -> Result<(), ApiError> {
    let allowed = state
        .permission_resolver
        .can_manage_team_requests(actor, team_id)
        .await
        .map_err(ApiError::from)?;

    if !allowed {
        return Err(ApiError::forbidden(
            "You do not manage this team's requests and invites",
        ));
    }

    Ok(())
}

/// GET /teams
pub async fn list_teams(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
) -> Result<Json<ListTeamsResponse>, ApiError> {
    let teams = state.team_service.list().await.map_err(ApiError::from)?;

    let teams: Vec<TeamResponse> = teams.iter().map(TeamResponse::from).collect();
    let total = teams.len();

    Ok(Json(ListTeamsResponse { teams, total }))
}

/// POST /teams
pub async fn create_team(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<CreateTeamApiRequest>,
) -> Result<(StatusCode, Json<TeamResponse>), ApiError> {
    debug!(name = %request.name, creator = %user.id(), "Creating team");

    let team = state
        .team_service
        .create(CreateTeamInput {
            name: request.name,
            description: request.description,
            created_by: user.id().clone(),
        })
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(TeamResponse::from(&team))))
}

/// GET /teams/{id}
pub async fn get_team(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
    Path(team_id): Path<String>,
) -> Result<Json<TeamDetailResponse>, ApiError> {
    let detail = state
        .team_service
        .detail(&team_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("Team '{}' not found", team_id)))?;

    Ok(Json(TeamDetailResponse {
        team: TeamResponse::from(&detail.team),
        members: detail.members.iter().map(UserResponse::from).collect(),
        roles: detail.roles.iter().map(RoleResponse::from).collect(),
    }))
}

/// GET /teams/{id}/requests - pending join requests, managers only
pub async fn list_team_requests(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(team_id): Path<String>,
) -> Result<Json<Vec<RequestResponse>>, ApiError> {
    let team_id = parse_team_id(&team_id)?;
    require_management(&state, user.id(), &team_id).await?;

    let requests = state
        .membership_service
        .team_requests(&team_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(requests.iter().map(RequestResponse::from).collect()))
}

/// GET /teams/{id}/invites - pending invites, managers only
pub async fn list_team_invites(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(team_id): Path<String>,
) -> Result<Json<Vec<InviteResponse>>, ApiError> {
    let team_id = parse_team_id(&team_id)?;
    require_management(&state, user.id(), &team_id).await?;

    let invites = state
        .membership_service
        .team_invites(&team_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(invites.iter().map(InviteResponse::from).collect()))
}

/// GET /teams/{id}/roles
pub async fn list_team_roles(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
    Path(team_id): Path<String>,
) -> Result<Json<Vec<RoleResponse>>, ApiError> {
    let team_id = parse_team_id(&team_id)?;

    let roles = state
        .role_service
        .team_roles(&team_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(roles.iter().map(RoleResponse::from).collect()))
}

/// POST /teams/{id}/roles - create a role, managers only
pub async fn create_team_role(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(team_id): Path<String>,
    Json(request): Json<CreateRoleApiRequest>,
) -> Result<(StatusCode, Json<RoleResponse>), ApiError> {
    let team_id = parse_team_id(&team_id)?;
    require_management(&state, user.id(), &team_id).await?;

    let role = state
        .role_service
        .create_role(
            CreateRoleInput {
                team_id,
                name: request.name,
                color: request.color,
            },
            user.id(),
        )
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(RoleResponse::from(&role))))
}

/// POST /teams/{id}/roles/{role_id}/assign - managers only
pub async fn assign_team_role(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((team_id, role_id)): Path<(String, String)>,
    Json(request): Json<AssignRoleApiRequest>,
) -> Result<StatusCode, ApiError> {
    let team_id = parse_team_id(&team_id)?;
    require_management(&state, user.id(), &team_id).await?;

    let target =
        UserId::new(&request.user_id).map_err(|e| ApiError::bad_request(e.to_string()))?;

    state
        .role_service
        .assign_role(&target, &RoleId::new(role_id), user.id())
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}
