//! Role repository trait

use async_trait::async_trait;

use super::entity::{RoleAssignment, RoleId, TeamRole};
use crate::domain::team::TeamId;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Repository for team roles and their assignments
#[async_trait]
pub trait RoleRepository: Send + Sync + std::fmt::Debug {
    /// Get a role by ID
    async fn get(&self, id: &RoleId) -> Result<Option<TeamRole>, DomainError>;

    /// Create a new role
    async fn create(&self, role: TeamRole) -> Result<TeamRole, DomainError>;

    /// Update an existing role
    async fn update(&self, role: TeamRole) -> Result<TeamRole, DomainError>;

    /// List all roles of a team, sorted by name
    async fn list_for_team(&self, team_id: &TeamId) -> Result<Vec<TeamRole>, DomainError>;

    /// Link a user to a role; fails on duplicate assignment
    async fn assign(&self, assignment: RoleAssignment) -> Result<RoleAssignment, DomainError>;

    /// Remove a user-role link, returns true if it existed
    async fn unassign(&self, user_id: &UserId, role_id: &RoleId) -> Result<bool, DomainError>;

    /// Remove every role assignment a user holds, returns how many were removed
    async fn unassign_all(&self, user_id: &UserId) -> Result<usize, DomainError>;

    /// Active roles a user holds that are scoped to the given team
    async fn roles_for_user_in_team(
        &self,
        user_id: &UserId,
        team_id: &TeamId,
    ) -> Result<Vec<TeamRole>, DomainError>;
}
