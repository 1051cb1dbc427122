//! User repository trait

use async_trait::async_trait;

use super::entity::{User, UserId};
use crate::domain::team::TeamId;
use crate::domain::DomainError;

/// Repository for managing users
#[async_trait]
pub trait UserRepository: Send + Sync + std::fmt::Debug {
    /// Get a user by ID
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by email
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Check whether a user with this email exists
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_email(email).await?.is_some())
    }

    /// Create a new user
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// List all users, sorted by name
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// List active members of a team, sorted by name
    async fn list_by_team(&self, team_id: &TeamId) -> Result<Vec<User>, DomainError>;

    /// Count all users
    async fn count(&self) -> Result<usize, DomainError>;
}
