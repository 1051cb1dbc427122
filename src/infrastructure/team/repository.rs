//! Storage-backed team repository implementation

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::storage::Storage;
use crate::domain::team::{Team, TeamId, TeamRepository};
use crate::domain::DomainError;

/// Storage-backed implementation of TeamRepository
#[derive(Debug)]
pub struct StorageTeamRepository {
    storage: Arc<dyn Storage<Team>>,
}

impl StorageTeamRepository {
    pub fn new(storage: Arc<dyn Storage<Team>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl TeamRepository for StorageTeamRepository {
    async fn get(&self, id: &TeamId) -> Result<Option<Team>, DomainError> {
        self.storage.get(id).await
    }

    async fn create(&self, team: Team) -> Result<Team, DomainError> {
        if self.storage.exists(team.id()).await? {
            return Err(DomainError::conflict(format!(
                "Team '{}' already exists",
                team.id().as_str()
            )));
        }

        self.storage.create(team).await
    }

    async fn update(&self, team: Team) -> Result<Team, DomainError> {
        if !self.storage.exists(team.id()).await? {
            return Err(DomainError::not_found(format!(
                "Team '{}' not found",
                team.id().as_str()
            )));
        }

        self.storage.update(team).await
    }

    async fn list_active(&self) -> Result<Vec<Team>, DomainError> {
        let mut teams: Vec<Team> = self
            .storage
            .list()
            .await?
            .into_iter()
            .filter(|t| t.status().is_active())
            .collect();

        teams.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(teams)
    }

    async fn exists(&self, id: &TeamId) -> Result<bool, DomainError> {
        self.storage.exists(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserId;
    use crate::infrastructure::storage::InMemoryStorage;

    fn create_repo() -> StorageTeamRepository {
        StorageTeamRepository::new(Arc::new(InMemoryStorage::<Team>::new()))
    }

    fn create_team(id: &str, name: &str) -> Team {
        Team::new(
            TeamId::new(id).unwrap(),
            name,
            UserId::new("user-1").unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = create_repo();
        let team = create_team("team-1", "Team One");

        repo.create(team.clone()).await.unwrap();

        let retrieved = repo.get(team.id()).await.unwrap();
        assert_eq!(retrieved.unwrap().name(), "Team One");
    }

    #[tokio::test]
    async fn test_create_duplicate() {
        let repo = create_repo();

        repo.create(create_team("team-1", "Team One")).await.unwrap();
        let result = repo.create(create_team("team-1", "Team Two")).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_update() {
        let repo = create_repo();
        let team = create_team("team-1", "Team One");

        repo.create(team.clone()).await.unwrap();

        let mut updated = repo.get(team.id()).await.unwrap().unwrap();
        updated.set_name("Renamed Team").unwrap();
        repo.update(updated).await.unwrap();

        let retrieved = repo.get(team.id()).await.unwrap().unwrap();
        assert_eq!(retrieved.name(), "Renamed Team");
    }

    #[tokio::test]
    async fn test_update_nonexistent() {
        let repo = create_repo();

        let result = repo.update(create_team("ghost", "Ghost Team")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_list_active_sorted() {
        let repo = create_repo();

        repo.create(create_team("team-b", "Bravo")).await.unwrap();
        repo.create(create_team("team-a", "Alpha")).await.unwrap();

        let mut inactive = create_team("team-c", "Charlie");
        inactive.deactivate();
        repo.create(inactive).await.unwrap();

        let teams = repo.list_active().await.unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].name(), "Alpha");
        assert_eq!(teams[1].name(), "Bravo");
    }

    #[tokio::test]
    async fn test_exists() {
        let repo = create_repo();
        let team = create_team("team-1", "Team One");

        assert!(!repo.exists(team.id()).await.unwrap());
        repo.create(team.clone()).await.unwrap();
        assert!(repo.exists(team.id()).await.unwrap());
    }
}
