//! Invite endpoints
//!
//! Sending an invite requires management rights on the team. Accepting and
//! declining are reserved for the invited user.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::CurrentUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::membership::{InviteId, TeamInvite};
use crate::domain::team::TeamId;
use crate::domain::user::UserId;

/// Invite representation over the wire
#[derive(Debug, Clone, Serialize)]
pub struct InviteResponse {
    pub id: String,
    pub team_id: String,
    pub user_id: String,
    pub invited_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&TeamInvite> for InviteResponse {
    fn from(invite: &TeamInvite) -> Self {
        Self {
            id: invite.id().as_str().to_string(),
            team_id: invite.team_id().as_str().to_string(),
            user_id: invite.user_id().as_str().to_string(),
            invited_by: invite.invited_by().as_str().to_string(),
            message: invite.message().map(String::from),
            status: invite.status().to_string(),
            created_at: invite.created_at().to_rfc3339(),
            updated_at: invite.updated_at().to_rfc3339(),
        }
    }
}

/// Request to send an invite
#[derive(Debug, Deserialize)]
pub struct CreateInviteApiRequest {
    pub team_id: String,
    pub user_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Action to take on a pending invite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteAction {
    Accept,
    Decline,
}

/// Body of PUT /teams/invites/{id}
#[derive(Debug, Deserialize)]
pub struct ResolveInviteApiRequest {
    pub action: InviteAction,
}

/// POST /teams/invites - invite a user, managers only
pub async fn create_invite(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<CreateInviteApiRequest>,
) -> Result<(StatusCode, Json<InviteResponse>), ApiError> {
    debug!(team = %request.team_id, invited = %request.user_id, "Creating invite");

    let team_id =
        TeamId::new(&request.team_id).map_err(|e| ApiError::bad_request(e.to_string()))?;
    let invited =
        UserId::new(&request.user_id).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let allowed = state
        .permission_resolver
        .can_manage_team_requests(user.id(), &team_id)
        .await
        .map_err(ApiError::from)?;

    if !allowed {
        return Err(ApiError::forbidden("You do not manage this team's invites"));
    }

    let created = state
        .membership_service
        .create_invite(&team_id, &invited, user.id(), request.message)
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(InviteResponse::from(&created))))
}

/// GET /teams/invites - the caller's pending invites
pub async fn list_own_invites(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<InviteResponse>>, ApiError> {
    let invites = state
        .membership_service
        .user_invites(user.id())
        .await
        .map_err(ApiError::from)?;

    Ok(Json(invites.iter().map(InviteResponse::from).collect()))
}

/// PUT /teams/invites/{id} - accept or decline
pub async fn resolve_invite(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(invite_id): Path<String>,
    Json(body): Json<ResolveInviteApiRequest>,
) -> Result<Json<InviteResponse>, ApiError> {
    let invite_id = InviteId::new(invite_id);

    let invite = state
        .membership_service
        .invite(&invite_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("Invite '{}' not found", invite_id)))?;

    if invite.user_id() != user.id() {
        return Err(ApiError::forbidden(
            "Only the invited user can respond to an invite",
        ));
    }

    let resolved = match body.action {
        InviteAction::Accept => state
            .membership_service
            .accept_invite(&invite_id)
            .await
            .map_err(ApiError::from)?,
        InviteAction::Decline => state
            .membership_service
            .decline_invite(&invite_id)
            .await
            .map_err(ApiError::from)?,
    };

    Ok(Json(InviteResponse::from(&resolved)))
}
