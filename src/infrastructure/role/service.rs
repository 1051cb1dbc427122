//! Role service for per-team role administration

use std::sync::Arc;

use tracing::info;

use crate::domain::audit::{AuditAction, AuditEvent};
use crate::domain::role::{RoleAssignment, RoleId, RoleRepository, TeamRole};
use crate::domain::team::{TeamId, TeamRepository};
use crate::domain::user::{UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::audit::AuditRecorder;

/// Input for creating a new team role
#[derive(Debug, Clone)]
pub struct CreateRoleInput {
    pub team_id: TeamId,
    pub name: String,
    pub color: String,
}

/// Team role administration
#[derive(Debug)]
pub struct RoleService {
    roles: Arc<dyn RoleRepository>,
    teams: Arc<dyn TeamRepository>,
    users: Arc<dyn UserRepository>,
    audit: Arc<AuditRecorder>,
}

impl RoleService {
    pub fn new(
        roles: Arc<dyn RoleRepository>,
        teams: Arc<dyn TeamRepository>,
        users: Arc<dyn UserRepository>,
        audit: Arc<AuditRecorder>,
    ) -> Self {
        Self {
            roles,
            teams,
            users,
            audit,
        }
    }

    /// Create a new role within a team
    pub async fn create_role(
        &self,
        input: CreateRoleInput,
        actor: &UserId,
    ) -> Result<TeamRole, DomainError> {
        if input.name.trim().is_empty() {
            return Err(DomainError::validation("Role name cannot be empty"));
        }

        if !self.teams.exists(&input.team_id).await? {
            return Err(DomainError::not_found(format!(
                "Team '{}' not found",
                input.team_id
            )));
        }

        info!(team = %input.team_id, name = %input.name, "Creating team role");

        let role = self
            .roles
            .create(TeamRole::new(input.team_id.clone(), &input.name, &input.color))
            .await?;

        self.audit
            .record(
                AuditEvent::new(
                    actor.clone(),
                    AuditAction::Create,
                    "team_role",
                    "Team role created",
                )
                .with_entity_id(role.id().as_str())
                .with_team(input.team_id),
            )
            .await;

        Ok(role)
    }

    /// List all roles of a team
    pub async fn team_roles(&self, team_id: &TeamId) -> Result<Vec<TeamRole>, DomainError> {
        self.roles.list_for_team(team_id).await
    }

    /// Assign a role to a user.
    ///
    /// A user may only hold roles within the team they currently belong to.
    pub async fn assign_role(
        &self,
        user_id: &UserId,
        role_id: &RoleId,
        actor: &UserId,
    ) -> Result<RoleAssignment, DomainError> {
        let role = self
            .roles
            .get(role_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Role '{}' not found", role_id)))?;

        if !role.is_active() {
            return Err(DomainError::validation(format!(
                "Role '{}' is inactive",
                role.name()
            )));
        }

        let user = self
            .users
            .get(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", user_id)))?;

        if user.team_id() != Some(role.team_id()) {
            return Err(DomainError::validation(
                "Users can only hold roles within their own team",
            ));
        }

        let assignment = self
            .roles
            .assign(RoleAssignment::new(user_id.clone(), role_id.clone()))
            .await?;

        self.audit
            .record(
                AuditEvent::new(
                    actor.clone(),
                    AuditAction::Update,
                    "team_role",
                    format!("Role '{}' assigned", role.name()),
                )
                .with_entity_id(user_id.as_str())
                .with_team(role.team_id().clone()),
            )
            .await;

        Ok(assignment)
    }

    /// Remove a role from a user, returns true if the assignment existed
    pub async fn unassign_role(
        &self,
        user_id: &UserId,
        role_id: &RoleId,
    ) -> Result<bool, DomainError> {
        self.roles.unassign(user_id, role_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit::AuditLog;
    use crate::domain::role::RoleAssignment;
    use crate::domain::team::{Team, TeamRepository as _};
    use crate::domain::user::{SystemRole, User, UserRepository as _};
    use crate::infrastructure::audit::StorageAuditLogRepository;
    use crate::infrastructure::role::StorageRoleRepository;
    use crate::infrastructure::storage::InMemoryStorage;
    use crate::infrastructure::team::StorageTeamRepository;
    use crate::infrastructure::user::StorageUserRepository;

    struct Fixture {
        service: RoleService,
        users: Arc<StorageUserRepository>,
        teams: Arc<StorageTeamRepository>,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(StorageUserRepository::new(Arc::new(
            InMemoryStorage::<User>::new(),
        )));
        let teams = Arc::new(StorageTeamRepository::new(Arc::new(
            InMemoryStorage::<Team>::new(),
        )));
        let roles = Arc::new(StorageRoleRepository::new(
            Arc::new(InMemoryStorage::<TeamRole>::new()),
            Arc::new(InMemoryStorage::<RoleAssignment>::new()),
        ));
        let audit = Arc::new(AuditRecorder::new(Arc::new(StorageAuditLogRepository::new(
            Arc::new(InMemoryStorage::<AuditLog>::new()),
        ))));

        Fixture {
            service: RoleService::new(roles, teams.clone(), users.clone(), audit),
            users,
            teams,
        }
    }

    fn actor() -> UserId {
        UserId::new("admin").unwrap()
    }

    async fn seed_team(fx: &Fixture, id: &str) -> TeamId {
        let team_id = TeamId::new(id).unwrap();
        fx.teams
            .create(Team::new(team_id.clone(), "Team", actor()).unwrap())
            .await
            .unwrap();
        team_id
    }

    async fn seed_member(fx: &Fixture, id: &str, team_id: Option<&TeamId>) -> UserId {
        let user_id = UserId::new(id).unwrap();
        let mut user = User::new(
            user_id.clone(),
            format!("{}@empresa.com", id),
            id,
            "hash",
            SystemRole::User,
        );

        if let Some(team_id) = team_id {
            user.assign_team(team_id.clone());
        }

        fx.users.create(user).await.unwrap();
        user_id
    }

    #[tokio::test]
    async fn test_create_role() {
        let fx = fixture();
        let team_id = seed_team(&fx, "dev-team").await;

        let role = fx
            .service
            .create_role(
                CreateRoleInput {
                    team_id: team_id.clone(),
                    name: "Tech Lead".to_string(),
                    color: "#FF5733".to_string(),
                },
                &actor(),
            )
            .await
            .unwrap();

        assert_eq!(role.name(), "Tech Lead");
        assert_eq!(role.team_id(), &team_id);
    }

    #[tokio::test]
    async fn test_create_role_unknown_team() {
        let fx = fixture();

        let result = fx
            .service
            .create_role(
                CreateRoleInput {
                    team_id: TeamId::new("ghost-team").unwrap(),
                    name: "Tech Lead".to_string(),
                    color: "#FF5733".to_string(),
                },
                &actor(),
            )
            .await;

        assert!(matches!(result.unwrap_err(), DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_assign_role_to_member() {
        let fx = fixture();
        let team_id = seed_team(&fx, "dev-team").await;
        let member = seed_member(&fx, "carlos", Some(&team_id)).await;

        let role = fx
            .service
            .create_role(
                CreateRoleInput {
                    team_id,
                    name: "Tech Lead".to_string(),
                    color: "#FF5733".to_string(),
                },
                &actor(),
            )
            .await
            .unwrap();

        let assignment = fx
            .service
            .assign_role(&member, role.id(), &actor())
            .await
            .unwrap();

        assert_eq!(assignment.user_id(), &member);
    }

    #[tokio::test]
    async fn test_assign_role_outside_own_team() {
        let fx = fixture();
        let team_id = seed_team(&fx, "dev-team").await;
        // User has no team
        let outsider = seed_member(&fx, "ana", None).await;

        let role = fx
            .service
            .create_role(
                CreateRoleInput {
                    team_id,
                    name: "Tech Lead".to_string(),
                    color: "#FF5733".to_string(),
                },
                &actor(),
            )
            .await
            .unwrap();

        let result = fx.service.assign_role(&outsider, role.id(), &actor()).await;
        assert!(matches!(
            result.unwrap_err(),
            DomainError::Validation { .. }
        ));
    }
}
