//! Session repository trait

use async_trait::async_trait;

use super::entity::{Session, SessionToken};
use crate::domain::DomainError;

/// Repository for server-side sessions
#[async_trait]
pub trait SessionRepository: Send + Sync + std::fmt::Debug {
    /// Persist a new session
    async fn create(&self, session: Session) -> Result<Session, DomainError>;

    /// Look up a session by its token
    async fn get(&self, token: &SessionToken) -> Result<Option<Session>, DomainError>;

    /// Delete a session, returns true if it existed
    async fn delete(&self, token: &SessionToken) -> Result<bool, DomainError>;

    /// Drop every expired session, returns how many were removed
    async fn delete_expired(&self) -> Result<usize, DomainError>;
}
