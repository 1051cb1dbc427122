//! Storage-backed audit log repository

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::audit::{AuditLog, AuditLogRepository, AuditQuery};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// Storage-backed implementation of AuditLogRepository
#[derive(Debug)]
pub struct StorageAuditLogRepository {
    storage: Arc<dyn Storage<AuditLog>>,
}

impl StorageAuditLogRepository {
    pub fn new(storage: Arc<dyn Storage<AuditLog>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl AuditLogRepository for StorageAuditLogRepository {
    async fn append(&self, entry: AuditLog) -> Result<AuditLog, DomainError> {
        self.storage.create(entry).await
    }

    async fn list(&self, query: &AuditQuery) -> Result<Vec<AuditLog>, DomainError> {
        let mut entries: Vec<AuditLog> = self
            .storage
            .list()
            .await?
            .into_iter()
            .filter(|entry| {
                if let Some(ref user_id) = query.user_id {
                    if entry.user_id() != user_id {
                        return false;
                    }
                }

                if let Some(ref team_id) = query.team_id {
                    if entry.team_id() != Some(team_id) {
                        return false;
                    }
                }

                if let Some(action) = query.action {
                    if entry.action() != action {
                        return false;
                    }
                }

                true
            })
            .collect();

        // Newest first
        entries.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        Ok(entries
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit::{AuditAction, AuditEvent};
    use crate::domain::team::TeamId;
    use crate::domain::user::UserId;
    use crate::infrastructure::storage::InMemoryStorage;

    fn repo() -> StorageAuditLogRepository {
        StorageAuditLogRepository::new(Arc::new(InMemoryStorage::<AuditLog>::new()))
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn team(id: &str) -> TeamId {
        TeamId::new(id).unwrap()
    }

    #[tokio::test]
    async fn test_append_and_list() {
        let repo = repo();

        repo.append(AuditLog::from_event(AuditEvent::login(user("carlos"))))
            .await
            .unwrap();
        repo.append(AuditLog::from_event(AuditEvent::logout(user("carlos"))))
            .await
            .unwrap();

        let entries = repo.list(&AuditQuery::new()).await.unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = repo();

        repo.append(AuditLog::from_event(AuditEvent::login(user("carlos"))))
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        repo.append(AuditLog::from_event(AuditEvent::logout(user("carlos"))))
            .await
            .unwrap();

        let entries = repo.list(&AuditQuery::new()).await.unwrap();
        assert_eq!(entries[0].action(), AuditAction::Logout);
        assert_eq!(entries[1].action(), AuditAction::Login);
    }

    #[tokio::test]
    async fn test_filter_by_user() {
        let repo = repo();

        repo.append(AuditLog::from_event(AuditEvent::login(user("carlos"))))
            .await
            .unwrap();
        repo.append(AuditLog::from_event(AuditEvent::login(user("ana"))))
            .await
            .unwrap();

        let entries = repo
            .list(&AuditQuery::new().with_user(user("ana")))
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].user_id().as_str(), "ana");
    }

    #[tokio::test]
    async fn test_filter_by_team_and_action() {
        let repo = repo();

        repo.append(AuditLog::from_event(AuditEvent::request_sent(
            user("carlos"),
            team("dev-team"),
        )))
        .await
        .unwrap();
        repo.append(AuditLog::from_event(AuditEvent::request_sent(
            user("ana"),
            team("design-team"),
        )))
        .await
        .unwrap();
        repo.append(AuditLog::from_event(AuditEvent::login(user("carlos"))))
            .await
            .unwrap();

        let entries = repo
            .list(
                &AuditQuery::new()
                    .with_team(team("dev-team"))
                    .with_action(AuditAction::RequestSent),
            )
            .await
            .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].user_id().as_str(), "carlos");
    }

    #[tokio::test]
    async fn test_pagination() {
        let repo = repo();

        for _ in 0..5 {
            repo.append(AuditLog::from_event(AuditEvent::login(user("carlos"))))
                .await
                .unwrap();
        }

        let entries = repo
            .list(&AuditQuery::new().with_limit(2).with_offset(1))
            .await
            .unwrap();
        assert_eq!(entries.len(), 2);
    }
}
