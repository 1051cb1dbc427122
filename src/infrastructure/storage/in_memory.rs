//! In-memory storage implementation

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::storage::{Storage, StorageEntity, StorageKey};
use crate::domain::DomainError;

/// Thread-safe in-memory storage implementation
///
/// Useful for testing and development. Data is lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    entities: RwLock<HashMap<String, E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    /// Creates a new empty in-memory storage
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let entities = self
            .entities
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entities.get(key.as_str()).cloned())
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let entities = self
            .entities
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entities.values().cloned().collect())
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut entities = self
            .entities
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        if entities.contains_key(&key) {
            return Err(DomainError::conflict(format!(
                "Entity with key '{}' already exists",
                key
            )));
        }

        entities.insert(key, entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut entities = self
            .entities
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        if !entities.contains_key(&key) {
            return Err(DomainError::not_found(format!(
                "Entity with key '{}' not found",
                key
            )));
        }

        entities.insert(key, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(entities.remove(key.as_str()).is_some())
    }

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        let entities = self
            .entities
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entities.contains_key(key.as_str()))
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let entities = self
            .entities
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entities.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::team::{Team, TeamId};
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
    async fn test_create_and_get() {
        let storage: InMemoryStorage<Team> = InMemoryStorage::new();
        let t = team("dev-team", "Dev Team");

        storage.create(t.clone()).await.unwrap();

        let result = storage.get(t.id()).await.unwrap();
        assert_eq!(result.unwrap().name(), "Dev Team");
    }

    #[tokio::test]
    async fn test_create_conflict() {
        let storage: InMemoryStorage<Team> = InMemoryStorage::new();

        storage.create(team("dev-team", "Dev Team")).await.unwrap();
        let result = storage.create(team("dev-team", "Other")).await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_update() {
        let storage: InMemoryStorage<Team> = InMemoryStorage::new();
        let t = team("dev-team", "Dev Team");

        storage.create(t.clone()).await.unwrap();

        let mut updated = t.clone();
        updated.set_name("Platform Team").unwrap();
        storage.update(updated).await.unwrap();

        let result = storage.get(t.id()).await.unwrap();
        assert_eq!(result.unwrap().name(), "Platform Team");
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let storage: InMemoryStorage<Team> = InMemoryStorage::new();

        let result = storage.update(team("ghost", "Ghost")).await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let storage: InMemoryStorage<Team> = InMemoryStorage::new();
        let t = team("dev-team", "Dev Team");

        storage.create(t.clone()).await.unwrap();
        let deleted = storage.delete(t.id()).await.unwrap();

        assert!(deleted);
        assert!(!storage.exists(t.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let storage: InMemoryStorage<Team> = InMemoryStorage::new();

        let deleted = storage.delete(&TeamId::new("ghost").unwrap()).await.unwrap();
        assert!(!deleted);
    }

    #[tokio::test]
    async fn test_list_and_count() {
        let storage: InMemoryStorage<Team> = InMemoryStorage::new();

        storage.create(team("team-a", "Team A")).await.unwrap();
        storage.create(team("team-b", "Team B")).await.unwrap();

        assert_eq!(storage.list().await.unwrap().len(), 2);
        assert_eq!(storage.count().await.unwrap(), 2);
    }

}
