//! Audit log endpoints

use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::audit::{AuditLog, AuditQuery};
use crate::domain::team::TeamId;
use crate::domain::user::UserId;

/// Audit entry representation over the wire
#[derive(Debug, Clone, Serialize)]
pub struct AuditLogResponse {
    pub id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    pub action: String,
    pub entity_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    pub created_at: String,
}

impl From<&AuditLog> for AuditLogResponse {
    fn from(entry: &AuditLog) -> Self {
        Self {
            id: entry.id().as_str().to_string(),
            user_id: entry.user_id().as_str().to_string(),
            team_id: entry.team_id().map(|t| t.as_str().to_string()),
            action: entry.action().to_string(),
            entity_type: entry.entity_type().to_string(),
            entity_id: entry.entity_id().map(String::from),
            description: entry.description().to_string(),
            metadata: entry.metadata().cloned(),
            created_at: entry.created_at().to_rfc3339(),
        }
    }
}

/// Query parameters of GET /audit-logs
#[derive(Debug, Default, Deserialize)]
pub struct AuditLogsQueryParams {
    pub user_id: Option<String>,
    pub team_id: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// List audit logs response
#[derive(Debug, Serialize)]
pub struct ListAuditLogsResponse {
    pub logs: Vec<AuditLogResponse>,
    pub total: usize,
}

/// GET /audit-logs - admin only
pub async fn list_audit_logs(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Query(params): Query<AuditLogsQueryParams>,
) -> Result<Json<ListAuditLogsResponse>, ApiError> {
    let mut query = AuditQuery::new();

    if let Some(user_id) = params.user_id {
        query = query
            .with_user(UserId::new(user_id).map_err(|e| ApiError::bad_request(e.to_string()))?);
    }

    if let Some(team_id) = params.team_id {
        query = query
            .with_team(TeamId::new(team_id).map_err(|e| ApiError::bad_request(e.to_string()))?);
    }

    if let Some(limit) = params.limit {
        query = query.with_limit(limit);
    }

    if let Some(offset) = params.offset {
        query = query.with_offset(offset);
    }

    let logs = state
        .audit_service
        .list(query)
        .await
        .map_err(ApiError::from)?;

    let logs: Vec<AuditLogResponse> = logs.iter().map(AuditLogResponse::from).collect();
    let total = logs.len();

    Ok(Json(ListAuditLogsResponse { logs, total }))
}
