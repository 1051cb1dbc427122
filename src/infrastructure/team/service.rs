//! Team service for team management

use std::sync::Arc;

use tracing::info;

use crate::domain::audit::AuditEvent;
use crate::domain::role::{RoleRepository, TeamRole};
use crate::domain::team::{validate_team_name, Team, TeamId, TeamRepository};
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::audit::AuditRecorder;

/// Input for creating a new team
#[derive(Debug, Clone)]
pub struct CreateTeamInput {
    pub name: String,
    pub description: Option<String>,
    pub created_by: UserId,
}

/// A team with its members and roles
#[derive(Debug, Clone)]
pub struct TeamDetail {
    pub team: Team,
    pub members: Vec<User>,
    pub roles: Vec<TeamRole>,
}

/// Team management service
#[derive(Debug)]
pub struct TeamService {
    teams: Arc<dyn TeamRepository>,
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
    audit: Arc<AuditRecorder>,
}

impl TeamService {
    pub fn new(
        teams: Arc<dyn TeamRepository>,
        users: Arc<dyn UserRepository>,
        roles: Arc<dyn RoleRepository>,
        audit: Arc<AuditRecorder>,
    ) -> Self {
        Self {
            teams,
            users,
            roles,
            audit,
        }
    }

    /// Create a new team.
    ///
    /// The creator does not automatically become a member; they manage the
    /// team through the creator rule in the permission resolver.
    pub async fn create(&self, input: CreateTeamInput) -> Result<Team, DomainError> {
        info!(name = %input.name, creator = %input.created_by, "Creating team");

        validate_team_name(&input.name).map_err(|e| DomainError::validation(e.to_string()))?;

        if self.users.get(&input.created_by).await?.is_none() {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                input.created_by
            )));
        }

        let mut team = Team::new(TeamId::generate(), &input.name, input.created_by.clone())
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(description) = input.description {
            team.set_description(Some(description));
        }

        let team = self.teams.create(team).await?;

        self.audit
            .record(AuditEvent::team_created(
                input.created_by,
                team.id().clone(),
            ))
            .await;

        Ok(team)
    }

    /// Get a team by ID
    pub async fn get(&self, id: &str) -> Result<Option<Team>, DomainError> {
        let team_id = TeamId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        self.teams.get(&team_id).await
    }

    /// List all active teams
    pub async fn list(&self) -> Result<Vec<Team>, DomainError> {
        self.teams.list_active().await
    }

    /// Active teams created by the given user
    pub async fn created_by(&self, user_id: &UserId) -> Result<Vec<Team>, DomainError> {
        let teams = self.teams.list_active().await?;
        Ok(teams
            .into_iter()
            .filter(|t| t.created_by() == user_id)
            .collect())
    }

    /// A team together with its active members and roles
    pub async fn detail(&self, id: &str) -> Result<Option<TeamDetail>, DomainError> {
        let team_id = TeamId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let team = match self.teams.get(&team_id).await? {
            Some(team) => team,
            None => return Ok(None),
        };

        let members = self.users.list_by_team(&team_id).await?;
        let roles = self.roles.list_for_team(&team_id).await?;

        Ok(Some(TeamDetail {
            team,
            members,
            roles,
        }))
    }
}
