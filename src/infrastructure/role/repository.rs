//! Storage-backed role repository implementation

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::role::{AssignmentId, RoleAssignment, RoleId, RoleRepository, TeamRole};
use crate::domain::storage::Storage;
use crate::domain::team::TeamId;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Storage-backed implementation of RoleRepository
///
/// Roles and assignment join records live in separate stores; the
/// user-in-team lookup joins them in memory.
#[derive(Debug)]
pub struct StorageRoleRepository {
    roles: Arc<dyn Storage<TeamRole>>,
    assignments: Arc<dyn Storage<RoleAssignment>>,
}

impl StorageRoleRepository {
    pub fn new(
        roles: Arc<dyn Storage<TeamRole>>,
        assignments: Arc<dyn Storage<RoleAssignment>>,
    ) -> Self {
        Self { roles, assignments }
    }
}

#[async_trait]
impl RoleRepository for StorageRoleRepository {
    async fn get(&self, id: &RoleId) -> Result<Option<TeamRole>, DomainError> {
        self.roles.get(id).await
    }

    async fn create(&self, role: TeamRole) -> Result<TeamRole, DomainError> {
        self.roles.create(role).await
    }

    async fn update(&self, role: TeamRole) -> Result<TeamRole, DomainError> {
        self.roles.update(role).await
    }

    async fn list_for_team(&self, team_id: &TeamId) -> Result<Vec<TeamRole>, DomainError> {
        let mut roles: Vec<TeamRole> = self
            .roles
            .list()
            .await?
            .into_iter()
            .filter(|r| r.team_id() == team_id)
            .collect();

        roles.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(roles)
    }

    async fn assign(&self, assignment: RoleAssignment) -> Result<RoleAssignment, DomainError> {
        if self.assignments.exists(assignment.id()).await? {
            return Err(DomainError::conflict(format!(
                "User '{}' already holds role '{}'",
                assignment.user_id(),
                assignment.role_id()
            )));
        }

        self.assignments.create(assignment).await
    }

    async fn unassign(&self, user_id: &UserId, role_id: &RoleId) -> Result<bool, DomainError> {
        self.assignments
            .delete(&AssignmentId::for_pair(user_id, role_id))
            .await
    }

    async fn unassign_all(&self, user_id: &UserId) -> Result<usize, DomainError> {
        let assignments: Vec<RoleAssignment> = self
            .assignments
            .list()
            .await?
            .into_iter()
            .filter(|a| a.user_id() == user_id)
            .collect();

        let mut removed = 0;

        for assignment in &assignments {
            if self.assignments.delete(assignment.id()).await? {
                removed += 1;
            }
        }

        Ok(removed)
    }

    async fn roles_for_user_in_team(
        &self,
        user_id: &UserId,
        team_id: &TeamId,
    ) -> Result<Vec<TeamRole>, DomainError> {
        let assignments = self.assignments.list().await?;
        let mut result = Vec::new();

        for assignment in assignments.iter().filter(|a| a.user_id() == user_id) {
            if let Some(role) = self.roles.get(assignment.role_id()).await? {
                if role.team_id() == team_id && role.is_active() {
                    result.push(role);
                }
            }
        }

        result.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryStorage;

    fn create_repo() -> StorageRoleRepository {
        StorageRoleRepository::new(
            Arc::new(InMemoryStorage::<TeamRole>::new()),
            Arc::new(InMemoryStorage::<RoleAssignment>::new()),
        )
    }

    fn team(id: &str) -> TeamId {
        TeamId::new(id).unwrap()
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list_for_team() {
        let repo = create_repo();

        repo.create(TeamRole::new(team("dev-team"), "Tech Lead", "#FF5733"))
            .await
            .unwrap();
        repo.create(TeamRole::new(team("dev-team"), "Backend Developer", "#33FF57"))
            .await
            .unwrap();
        repo.create(TeamRole::new(team("design-team"), "Design Lead", "#5733FF"))
            .await
            .unwrap();

        let roles = repo.list_for_team(&team("dev-team")).await.unwrap();
        assert_eq!(roles.len(), 2);
        assert_eq!(roles[0].name(), "Backend Developer");
        assert_eq!(roles[1].name(), "Tech Lead");
    }

    #[tokio::test]
    async fn test_assign_and_lookup() {
        let repo = create_repo();

        let role = repo
            .create(TeamRole::new(team("dev-team"), "Tech Lead", "#FF5733"))
            .await
            .unwrap();
        repo.assign(RoleAssignment::new(user("carlos"), role.id().clone()))
            .await
            .unwrap();

        let roles = repo
            .roles_for_user_in_team(&user("carlos"), &team("dev-team"))
            .await
            .unwrap();
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].name(), "Tech Lead");

        // Scoped to the role's team
        let other_team = repo
            .roles_for_user_in_team(&user("carlos"), &team("design-team"))
            .await
            .unwrap();
        assert!(other_team.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_assignment() {
        let repo = create_repo();

        let role = repo
            .create(TeamRole::new(team("dev-team"), "Tech Lead", "#FF5733"))
            .await
            .unwrap();
        repo.assign(RoleAssignment::new(user("carlos"), role.id().clone()))
            .await
            .unwrap();

        let result = repo
            .assign(RoleAssignment::new(user("carlos"), role.id().clone()))
            .await;
        assert!(matches!(result.unwrap_err(), DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_inactive_roles_are_excluded() {
        let repo = create_repo();

        let mut role = repo
            .create(TeamRole::new(team("dev-team"), "Tech Lead", "#FF5733"))
            .await
            .unwrap();
        repo.assign(RoleAssignment::new(user("carlos"), role.id().clone()))
            .await
            .unwrap();

        role.deactivate();
        repo.update(role).await.unwrap();

        let roles = repo
            .roles_for_user_in_team(&user("carlos"), &team("dev-team"))
            .await
            .unwrap();
        assert!(roles.is_empty());
    }

    #[tokio::test]
    async fn test_unassign_all() {
        let repo = create_repo();

        let lead = repo
            .create(TeamRole::new(team("dev-team"), "Tech Lead", "#FF5733"))
            .await
            .unwrap();
        let qa = repo
            .create(TeamRole::new(team("dev-team"), "QA Engineer", "#33FF57"))
            .await
            .unwrap();

        repo.assign(RoleAssignment::new(user("carlos"), lead.id().clone()))
            .await
            .unwrap();
        repo.assign(RoleAssignment::new(user("carlos"), qa.id().clone()))
            .await
            .unwrap();

        let removed = repo.unassign_all(&user("carlos")).await.unwrap();
        assert_eq!(removed, 2);

        let roles = repo
            .roles_for_user_in_team(&user("carlos"), &team("dev-team"))
            .await
            .unwrap();
        assert!(roles.is_empty());
    }
}
