//! Audit log repository trait

use async_trait::async_trait;

use super::entity::{AuditAction, AuditLog};
use crate::domain::team::TeamId;
use crate::domain::user::UserId;
use crate::domain::DomainError;

const DEFAULT_LIMIT: usize = 50;

/// Query parameters for listing audit logs
#[derive(Debug, Clone)]
pub struct AuditQuery {
    /// Filter by acting user
    pub user_id: Option<UserId>,
    /// Filter by team
    pub team_id: Option<TeamId>,
    /// Filter by action kind
    pub action: Option<AuditAction>,
    /// Maximum number of results
    pub limit: usize,
    /// Offset for pagination
    pub offset: usize,
}

impl Default for AuditQuery {
    fn default() -> Self {
        Self {
            user_id: None,
            team_id: None,
            action: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl AuditQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }

    pub fn with_action(mut self, action: AuditAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

/// Append-only repository for audit logs
#[async_trait]
pub trait AuditLogRepository: Send + Sync + std::fmt::Debug {
    /// Append a new entry
    async fn append(&self, entry: AuditLog) -> Result<AuditLog, DomainError>;

    /// List entries matching the query, newest first
    async fn list(&self, query: &AuditQuery) -> Result<Vec<AuditLog>, DomainError>;
}
