//! Join request endpoints
//!
//! Creating a request is self-service. Approving and rejecting require
//! management rights on the request's team; cancelling is reserved for the
//! requester. The lifecycle rules themselves live in the membership
//! service.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::CurrentUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::membership::{RequestId, TeamRequest};
use crate::domain::team::TeamId;

/// Join request representation over the wire
#[derive(Debug, Clone, Serialize)]
pub struct RequestResponse {
    pub id: String,
    pub team_id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&TeamRequest> for RequestResponse {
    fn from(request: &TeamRequest) -> Self {
        Self {
            id: request.id().as_str().to_string(),
            team_id: request.team_id().as_str().to_string(),
            user_id: request.user_id().as_str().to_string(),
            message: request.message().map(String::from),
            status: request.status().to_string(),
            created_at: request.created_at().to_rfc3339(),
            updated_at: request.updated_at().to_rfc3339(),
        }
    }
}

/// Request to create a join request
#[derive(Debug, Deserialize)]
pub struct CreateRequestApiRequest {
    pub team_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Action to take on a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestAction {
    Approve,
    Reject,
    Cancel,
}

/// Body of PUT /teams/requests/{id}
#[derive(Debug, Deserialize)]
pub struct ResolveRequestApiRequest {
    pub action: RequestAction,
}

/// POST /teams/requests - ask to join a team
pub async fn create_request(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<CreateRequestApiRequest>,
) -> Result<(StatusCode, Json<RequestResponse>), ApiError> {
    debug!(team = %request.team_id, user = %user.id(), "Creating join request");

    let team_id =
        TeamId::new(&request.team_id).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let created = state
        .membership_service
        .create_request(&team_id, user.id(), request.message)
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(RequestResponse::from(&created))))
}

/// GET /teams/requests - the caller's pending join requests
pub async fn list_own_requests(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<RequestResponse>>, ApiError> {
    let requests = state
        .membership_service
        .user_requests(user.id())
        .await
        .map_err(ApiError::from)?;

    Ok(Json(requests.iter().map(RequestResponse::from).collect()))
}

/// PUT /teams/requests/{id} - approve, reject or cancel
pub async fn resolve_request(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(request_id): Path<String>,
    Json(body): Json<ResolveRequestApiRequest>,
) -> Result<Json<RequestResponse>, ApiError> {
    let request_id = RequestId::new(request_id);

    let request = state
        .membership_service
        .request(&request_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("Request '{}' not found", request_id)))?;

    let resolved = match body.action {
        RequestAction::Approve | RequestAction::Reject => {
            let allowed = state
                .permission_resolver
                .can_manage_team_requests(user.id(), request.team_id())
                .await
                .map_err(ApiError::from)?;

            if !allowed {
                return Err(ApiError::forbidden(
                    "You do not manage this team's requests",
                ));
            }

            if body.action == RequestAction::Approve {
                state
                    .membership_service
                    .approve_request(&request_id, user.id())
                    .await
                    .map_err(ApiError::from)?
            } else {
                state
                    .membership_service
                    .reject_request(&request_id, user.id())
                    .await
                    .map_err(ApiError::from)?
            }
        }
        RequestAction::Cancel => {
            if request.user_id() != user.id() {
                return Err(ApiError::forbidden(
                    "Only the requester can cancel a join request",
                ));
            }

            state
                .membership_service
                .cancel_request(&request_id, user.id())
                .await
                .map_err(ApiError::from)?
        }
    };

    Ok(Json(RequestResponse::from(&resolved)))
}
