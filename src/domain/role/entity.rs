//! Team role entities
//!
//! A `TeamRole` is a named role scoped to exactly one team ("Tech Lead",
//! "QA Engineer", ...). Users are linked to roles through `RoleAssignment`
//! join records; a user may only hold roles within the team they currently
//! belong to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::team::TeamId;
use crate::domain::user::UserId;

/// Role identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleId(String);

impl RoleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(format!("role-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for RoleId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Status of a team role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoleStatus {
    #[default]
    Active,
    Inactive,
}

impl RoleStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// A named role belonging to exactly one team
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRole {
    id: RoleId,
    /// Team this role belongs to
    team_id: TeamId,
    /// Role name, matched against leadership keywords by the permission resolver
    name: String,
    /// Display color
    color: String,
    status: RoleStatus,
    created_at: DateTime<Utc>,
}

impl TeamRole {
    pub fn new(team_id: TeamId, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: RoleId::generate(),
            team_id,
            name: name.into(),
            color: color.into(),
            status: RoleStatus::Active,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &RoleId {
        &self.id
    }

    pub fn team_id(&self) -> &TeamId {
        &self.team_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn status(&self) -> RoleStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Deactivate this role; inactive roles no longer grant anything
    pub fn deactivate(&mut self) {
        self.status = RoleStatus::Inactive;
    }
}

impl StorageEntity for TeamRole {
    type Key = RoleId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

/// Assignment join key - one record per (user, role) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentId(String);

impl AssignmentId {
    /// Deterministic key for a (user, role) pair
    pub fn for_pair(user_id: &UserId, role_id: &RoleId) -> Self {
        Self(format!("{}:{}", user_id.as_str(), role_id.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl StorageKey for AssignmentId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Join record linking a user to a team role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleAssignment {
    id: AssignmentId,
    user_id: UserId,
    role_id: RoleId,
    created_at: DateTime<Utc>,
}

impl RoleAssignment {
    pub fn new(user_id: UserId, role_id: RoleId) -> Self {
        Self {
            id: AssignmentId::for_pair(&user_id, &role_id),
            user_id,
            role_id,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &AssignmentId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn role_id(&self) -> &RoleId {
        &self.role_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl StorageEntity for RoleAssignment {
    type Key = AssignmentId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
