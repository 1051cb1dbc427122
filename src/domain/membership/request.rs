//! Team join request entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::team::TeamId;
use crate::domain::user::UserId;

/// Request identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(format!("req-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for RequestId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Lifecycle state of a join request
///
/// Pending is the only non-terminal state; a resolved request is immutable
/// history and never returns to pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    /// Terminal state for both admin rejection and requester cancellation
    Rejected,
}

impl RequestStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// A user-initiated request to join a team
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRequest {
    id: RequestId,
    team_id: TeamId,
    /// The user asking to join
    user_id: UserId,
    /// Optional note from the requester to the team
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    status: RequestStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TeamRequest {
    /// Create a new pending request
    pub fn new(team_id: TeamId, user_id: UserId, message: Option<String>) -> Self {
        let now = Utc::now();

        Self {
            id: RequestId::generate(),
            team_id,
            user_id,
            message,
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &RequestId {
        &self.id
    }

    pub fn team_id(&self) -> &TeamId {
        &self.team_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    /// Move the request into a terminal state. Callers are responsible for
    /// checking `is_pending()` first; terminal states are never overwritten.
    pub fn resolve(&mut self, status: RequestStatus) {
        debug_assert!(status.is_terminal());
        debug_assert!(self.is_pending());
        self.status = status;
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for TeamRequest {
    type Key = RequestId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
