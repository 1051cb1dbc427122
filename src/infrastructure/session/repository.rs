//! Storage-backed session repository implementation

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::session::{Session, SessionRepository, SessionToken};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// Storage-backed implementation of SessionRepository
#[derive(Debug)]
pub struct StorageSessionRepository {
    storage: Arc<dyn Storage<Session>>,
}

impl StorageSessionRepository {
    pub fn new(storage: Arc<dyn Storage<Session>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl SessionRepository for StorageSessionRepository {
    async fn create(&self, session: Session) -> Result<Session, DomainError> {
        self.storage.create(session).await
    }

    async fn get(&self, token: &SessionToken) -> Result<Option<Session>, DomainError> {
        self.storage.get(token).await
    }

    async fn delete(&self, token: &SessionToken) -> Result<bool, DomainError> {
        self.storage.delete(token).await
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        let now = Utc::now();
        let expired: Vec<Session> = self
            .storage
            .list()
            .await?
            .into_iter()
            .filter(|s| s.is_expired(now))
            .collect();

        let mut removed = 0;

        for session in &expired {
            if self.storage.delete(session.token()).await? {
                removed += 1;
            }
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserId;
    use crate::infrastructure::storage::InMemoryStorage;
    use chrono::Duration;

    fn create_repo() -> StorageSessionRepository {
        StorageSessionRepository::new(Arc::new(InMemoryStorage::<Session>::new()))
    }

    fn session(token: &str, expires_in_hours: i64) -> Session {
        Session::new(
            SessionToken::new(token),
            UserId::new("carlos").unwrap(),
            Utc::now() + Duration::hours(expires_in_hours),
        )
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = create_repo();

        repo.create(session("tok-1", 1)).await.unwrap();

        let found = repo.get(&SessionToken::new("tok-1")).await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().user_id().as_str(), "carlos");
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = create_repo();

        repo.create(session("tok-1", 1)).await.unwrap();

        assert!(repo.delete(&SessionToken::new("tok-1")).await.unwrap());
        assert!(!repo.delete(&SessionToken::new("tok-1")).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_expired() {
        let repo = create_repo();

        repo.create(session("live", 1)).await.unwrap();
        repo.create(session("dead-1", -1)).await.unwrap();
        repo.create(session("dead-2", -2)).await.unwrap();

        let removed = repo.delete_expired().await.unwrap();
        assert_eq!(removed, 2);

        assert!(repo.get(&SessionToken::new("live")).await.unwrap().is_some());
        assert!(repo.get(&SessionToken::new("dead-1")).await.unwrap().is_none());
    }
}
