//! Team invite entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::team::TeamId;
use crate::domain::user::UserId;

/// Invite identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InviteId(String);

impl InviteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(format!("inv-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InviteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for InviteId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Lifecycle state of an invite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InviteStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
}

impl InviteStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }
}

impl std::fmt::Display for InviteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Accepted => write!(f, "accepted"),
            Self::Declined => write!(f, "declined"),
        }
    }
}

/// A team-initiated invite for a user to join
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamInvite {
    id: InviteId,
    team_id: TeamId,
    /// The invited user
    user_id: UserId,
    /// The user who sent the invite
    invited_by: UserId,
    /// Optional note from the inviter
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    status: InviteStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TeamInvite {
    /// Create a new pending invite
    pub fn new(
        team_id: TeamId,
        user_id: UserId,
        invited_by: UserId,
        message: Option<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: InviteId::generate(),
            team_id,
            user_id,
            invited_by,
            message,
            status: InviteStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &InviteId {
        &self.id
    }

    pub fn team_id(&self) -> &TeamId {
        &self.team_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn invited_by(&self) -> &UserId {
        &self.invited_by
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn status(&self) -> InviteStatus {
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

    /// Move the invite into a terminal state. Callers are responsible for
    /// checking `is_pending()` first; terminal states are never overwritten.
    pub fn resolve(&mut self, status: InviteStatus) {
        debug_assert!(status.is_terminal());
        debug_assert!(self.is_pending());
        self.status = status;
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for TeamInvite {
    type Key = InviteId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invite() -> TeamInvite {
        TeamInvite::new(
            TeamId::new("design-team").unwrap(),
            UserId::new("lucas").unwrap(),
            UserId::new("sofia").unwrap(),
            None,
        )
    }

    #[test]
    fn test_new_invite_is_pending() {
        let invite = invite();

        assert!(invite.id().as_str().starts_with("inv-"));
        assert!(invite.is_pending());
        assert_eq!(invite.invited_by().as_str(), "sofia");
        assert!(invite.message().is_none());
    }

    #[test]
    fn test_resolve_accepted() {
        let mut invite = invite();

        invite.resolve(InviteStatus::Accepted);
        assert_eq!(invite.status(), InviteStatus::Accepted);
        assert!(!invite.is_pending());
    }

    #[test]
    fn test_resolve_declined() {
        let mut invite = invite();

        invite.resolve(InviteStatus::Declined);
        assert_eq!(invite.status(), InviteStatus::Declined);
    }

    #[test]
    fn test_status_terminality() {
        assert!(InviteStatus::Pending.is_pending());
        assert!(InviteStatus::Accepted.is_terminal());
        assert!(InviteStatus::Declined.is_terminal());
    }
}
