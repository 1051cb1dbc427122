//! Audit log entities
//!
//! Audit entries are immutable: they are appended by the services as a side
//! effect of the primary operation and never updated or deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::team::TeamId;
use crate::domain::user::UserId;

/// Audit log entry identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuditLogId(String);

impl AuditLogId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(format!("log-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AuditLogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for AuditLogId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Kind of action recorded in the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Login,
    Logout,
    Create,
    Update,
    Delete,
    RoleChanged,
    StatusChanged,
    InviteSent,
    InviteAccepted,
    InviteDeclined,
    RequestSent,
    RequestApproved,
    RequestRejected,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Logout => "logout",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::RoleChanged => "role_changed",
            Self::StatusChanged => "status_changed",
            Self::InviteSent => "invite_sent",
            Self::InviteAccepted => "invite_accepted",
            Self::InviteDeclined => "invite_declined",
            Self::RequestSent => "request_sent",
            Self::RequestApproved => "request_approved",
            Self::RequestRejected => "request_rejected",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a request came from, if the transport layer captured it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestOrigin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl RequestOrigin {
    pub fn new(ip_address: Option<String>, user_agent: Option<String>) -> Self {
        Self {
            ip_address,
            user_agent,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ip_address.is_none() && self.user_agent.is_none()
    }
}

/// An event to be recorded, before it is assigned an ID and timestamp
#[derive(Debug, Clone)]
pub struct AuditEvent {
    /// The acting user
    pub user_id: UserId,
    pub team_id: Option<TeamId>,
    pub action: AuditAction,
    pub entity_type: String,
    pub entity_id: Option<String>,
    pub description: String,
    pub metadata: Option<serde_json::Value>,
    pub origin: RequestOrigin,
}

impl AuditEvent {
    pub fn new(
        user_id: UserId,
        action: AuditAction,
        entity_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            team_id: None,
            action,
            entity_type: entity_type.into(),
            entity_id: None,
            description: description.into(),
            metadata: None,
            origin: RequestOrigin::default(),
        }
    }

    pub fn with_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }

    pub fn with_entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_origin(mut self, origin: RequestOrigin) -> Self {
        self.origin = origin;
        self
    }

    // Shorthand constructors for the events the services emit

    pub fn login(user_id: UserId) -> Self {
        Self::new(user_id.clone(), AuditAction::Login, "user", "User logged in")
            .with_entity_id(user_id.as_str())
    }

    pub fn logout(user_id: UserId) -> Self {
        Self::new(
            user_id.clone(),
            AuditAction::Logout,
            "user",
            "User logged out",
        )
        .with_entity_id(user_id.as_str())
    }

    pub fn user_created(actor: UserId, new_user: &UserId) -> Self {
        Self::new(actor, AuditAction::Create, "user", "New user created")
            .with_entity_id(new_user.as_str())
    }

    pub fn user_updated(actor: UserId, user: &UserId, changes: serde_json::Value) -> Self {
        Self::new(
            actor,
            AuditAction::Update,
            "user",
            "User information updated",
        )
        .with_entity_id(user.as_str())
        .with_metadata(changes)
    }

    pub fn role_changed(actor: UserId, user: &UserId, old_role: &str, new_role: &str) -> Self {
        Self::new(actor, AuditAction::RoleChanged, "user", "User role changed")
            .with_entity_id(user.as_str())
            .with_metadata(serde_json::json!({
                "old_role": old_role,
                "new_role": new_role,
            }))
    }

    pub fn status_changed(actor: UserId, user: &UserId, old_status: &str, new_status: &str) -> Self {
        Self::new(
            actor,
            AuditAction::StatusChanged,
            "user",
            "User status changed",
        )
        .with_entity_id(user.as_str())
        .with_metadata(serde_json::json!({
            "old_status": old_status,
            "new_status": new_status,
        }))
    }

    pub fn team_created(actor: UserId, team_id: TeamId) -> Self {
        Self::new(actor, AuditAction::Create, "team", "Team created")
            .with_entity_id(team_id.as_str())
            .with_team(team_id)
    }

    pub fn request_sent(user_id: UserId, team_id: TeamId) -> Self {
        Self::new(
            user_id,
            AuditAction::RequestSent,
            "request",
            "Team join request sent",
        )
        .with_team(team_id)
    }

    pub fn request_approved(actor: UserId, requester: &UserId, team_id: TeamId) -> Self {
        Self::new(
            actor,
            AuditAction::RequestApproved,
            "request",
            "Team join request approved",
        )
        .with_entity_id(requester.as_str())
        .with_team(team_id)
    }

    pub fn request_rejected(actor: UserId, requester: &UserId, team_id: TeamId) -> Self {
        Self::new(
            actor,
            AuditAction::RequestRejected,
            "request",
            "Team join request rejected",
        )
        .with_entity_id(requester.as_str())
        .with_team(team_id)
    }

    pub fn request_cancelled(actor: UserId, team_id: TeamId) -> Self {
        Self::new(
            actor,
            AuditAction::RequestRejected,
            "request",
            "Team join request cancelled by requester",
        )
        .with_team(team_id)
    }

    pub fn invite_sent(actor: UserId, invited: &UserId, team_id: TeamId) -> Self {
        Self::new(actor, AuditAction::InviteSent, "invite", "Team invite sent")
            .with_entity_id(invited.as_str())
            .with_team(team_id)
    }

    pub fn invite_accepted(user_id: UserId, team_id: TeamId) -> Self {
        Self::new(
            user_id,
            AuditAction::InviteAccepted,
            "invite",
            "Team invite accepted",
        )
        .with_team(team_id)
    }

    pub fn invite_declined(user_id: UserId, team_id: TeamId) -> Self {
        Self::new(
            user_id,
            AuditAction::InviteDeclined,
            "invite",
            "Team invite declined",
        )
        .with_team(team_id)
    }
}

/// A persisted audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    id: AuditLogId,
    user_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    team_id: Option<TeamId>,
    action: AuditAction,
    entity_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    entity_id: Option<String>,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "RequestOrigin::is_empty", default)]
    origin: RequestOrigin,
    created_at: DateTime<Utc>,
}

impl AuditLog {
    /// Materialize an event into a log entry
    pub fn from_event(event: AuditEvent) -> Self {
        Self {
            id: AuditLogId::generate(),
            user_id: event.user_id,
            team_id: event.team_id,
            action: event.action,
            entity_type: event.entity_type,
            entity_id: event.entity_id,
            description: event.description,
            metadata: event.metadata,
            origin: event.origin,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &AuditLogId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn team_id(&self) -> Option<&TeamId> {
        self.team_id.as_ref()
    }

    pub fn action(&self) -> AuditAction {
        self.action
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn metadata(&self) -> Option<&serde_json::Value> {
        self.metadata.as_ref()
    }

    pub fn origin(&self) -> &RequestOrigin {
        &self.origin
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl StorageEntity for AuditLog {
    type Key = AuditLogId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
