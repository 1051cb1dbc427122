//! Audit read service

use std::sync::Arc;

use crate::domain::audit::{AuditLog, AuditLogRepository, AuditQuery};
use crate::domain::DomainError;

const MAX_PAGE_SIZE: usize = 200;

/// Read access to the audit trail
#[derive(Debug)]
pub struct AuditService {
    repository: Arc<dyn AuditLogRepository>,
}

impl AuditService {
    pub fn new(repository: Arc<dyn AuditLogRepository>) -> Self {
        Self { repository }
    }

    /// List audit entries matching the query, newest first
    pub async fn list(&self, mut query: AuditQuery) -> Result<Vec<AuditLog>, DomainError> {
        if query.limit == 0 || query.limit > MAX_PAGE_SIZE {
            query.limit = MAX_PAGE_SIZE;
        }

        self.repository.list(&query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit::AuditEvent;
    use crate::domain::user::UserId;
    use crate::infrastructure::audit::StorageAuditLogRepository;
    use crate::infrastructure::storage::InMemoryStorage;

    async fn service_with_entries(n: usize) -> AuditService {
        let repository = Arc::new(StorageAuditLogRepository::new(Arc::new(
            InMemoryStorage::new(),
        )));

        for _ in 0..n {
            repository
                .append(crate::domain::audit::AuditLog::from_event(
                    AuditEvent::login(UserId::new("carlos").unwrap()),
                ))
                .await
                .unwrap();
        }

        AuditService::new(repository)
    }

    #[tokio::test]
    async fn test_list_returns_entries() {
        let service = service_with_entries(3).await;

        let entries = service.list(AuditQuery::new()).await.unwrap();
        assert_eq!(entries.len(), 3);
    }

    #[tokio::test]
    async fn test_list_caps_page_size() {
        let service = service_with_entries(1).await;

        let entries = service
            .list(AuditQuery::new().with_limit(10_000))
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
    }
}
