//! Storage-backed user repository implementation

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::storage::Storage;
use crate::domain::team::TeamId;
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// Storage-backed implementation of UserRepository
///
/// Email lookups scan the full set; the backing store only indexes by ID.
#[derive(Debug)]
pub struct StorageUserRepository {
    storage: Arc<dyn Storage<User>>,
}

impl StorageUserRepository {
    pub fn new(storage: Arc<dyn Storage<User>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl UserRepository for StorageUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.storage.get(id).await
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.storage.list().await?;
        Ok(users.into_iter().find(|u| u.email() == email))
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        if self.email_exists(user.email()).await? {
            return Err(DomainError::conflict(format!(
                "Email '{}' is already in use",
                user.email()
            )));
        }

        self.storage.create(user).await
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        if !self.storage.exists(user.id()).await? {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                user.id().as_str()
            )));
        }

        self.storage.update(user).await
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let mut users = self.storage.list().await?;
        users.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(users)
    }

    async fn list_by_team(&self, team_id: &TeamId) -> Result<Vec<User>, DomainError> {
        let mut users: Vec<User> = self
            .storage
            .list()
            .await?
            .into_iter()
            .filter(|u| u.is_active() && u.team_id() == Some(team_id))
            .collect();

        users.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(users)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        self.storage.count().await
    }
}
