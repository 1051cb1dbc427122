//! Team repository trait

use async_trait::async_trait;

use super::entity::{Team, TeamId};
use crate::domain::DomainError;

/// Repository for managing teams
#[async_trait]
pub trait TeamRepository: Send + Sync + std::fmt::Debug {
    /// Get a team by ID
    async fn get(&self, id: &TeamId) -> Result<Option<Team>, DomainError>;

    /// Create a new team
    async fn create(&self, team: Team) -> Result<Team, DomainError>;

    /// Update an existing team
    async fn update(&self, team: Team) -> Result<Team, DomainError>;

    /// List all active teams, sorted by name
    async fn list_active(&self) -> Result<Vec<Team>, DomainError>;

    /// Check if a team exists
    async fn exists(&self, id: &TeamId) -> Result<bool, DomainError>;
}


#[cfg(test)]
mod tests {
    use super::mock::MockTeamRepository;
    use super::*;
    use crate::domain::user::UserId;

    fn team(id: &str, name: &str) -> Team {
        Team::new(
            TeamId::new(id).unwrap(),
            name,
            UserId::new("user-1").unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_mock_create_and_get() {
        let repo = MockTeamRepository::new();
        let created = repo.create(team("dev-team", "Dev Team")).await.unwrap();
        assert_eq!(created.id().as_str(), "dev-team");

        let fetched = repo.get(&TeamId::new("dev-team").unwrap()).await.unwrap();
        assert!(fetched.is_some());
        assert_eq!(fetched.unwrap().name(), "Dev Team");
    }

    #[tokio::test]
    async fn test_mock_create_duplicate() {
        let repo = MockTeamRepository::new();
        repo.create(team("dev-team", "Dev Team")).await.unwrap();

        let result = repo.create(team("dev-team", "Other")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_mock_list_active_excludes_inactive() {
        let mut inactive = team("old-team", "Old Team");
        inactive.deactivate();

        let repo = MockTeamRepository::new().with_team(inactive);
        repo.create(team("dev-team", "Dev Team")).await.unwrap();

        let teams = repo.list_active().await.unwrap();
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].name(), "Dev Team");
    }
}
