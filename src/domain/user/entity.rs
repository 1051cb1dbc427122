//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{validate_user_id, UserValidationError};
use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::team::TeamId;

/// User identifier - alphanumeric + hyphens, max 64 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        validate_user_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh random user ID
    pub fn generate() -> Self {
        Self(format!("user-{}", Uuid::new_v4()))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for UserId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// System-wide role of a user (distinct from per-team roles)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SystemRole {
    /// Full access, including the cross-team user directory
    SuperAdmin,
    /// Administrative access within the platform
    Admin,
    /// Elevated access for day-to-day management
    Manager,
    /// Regular user
    #[default]
    User,
}

impl SystemRole {
    /// Check whether this role carries administrative privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::SuperAdmin | Self::Admin)
    }

    /// Check whether this role can see every user on the platform
    pub fn can_view_all_users(&self) -> bool {
        matches!(self, Self::SuperAdmin)
    }
}

impl std::fmt::Display for SystemRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SuperAdmin => write!(f, "super_admin"),
            Self::Admin => write!(f, "admin"),
            Self::Manager => write!(f, "manager"),
            Self::User => write!(f, "user"),
        }
    }
}

/// Status of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// User is active and can log in
    #[default]
    Active,
    /// User is deactivated (soft-deleted or suspended)
    Inactive,
}

impl UserStatus {
    /// Check if the user can log in
    pub fn can_login(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    id: UserId,
    /// Login email, unique across the platform
    email: String,
    /// Display name
    name: String,
    /// Password hash - never exposed in serialization
    #[serde(skip_serializing)]
    password_hash: String,
    /// System-wide role
    role: SystemRole,
    /// Current status
    status: UserStatus,
    /// The single team this user belongs to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    team_id: Option<TeamId>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with no team assignment
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        name: impl Into<String>,
        password_hash: impl Into<String>,
        role: SystemRole,
    ) -> Self {
        let now = Utc::now();

        Self {
            id,
            email: email.into(),
            name: name.into(),
            password_hash: password_hash.into(),
            role,
            status: UserStatus::Active,
            team_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn role(&self) -> SystemRole {
        self.role
    }

    pub fn status(&self) -> UserStatus {
        self.status
    }

    pub fn team_id(&self) -> Option<&TeamId> {
        self.team_id.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Check if the user is active and can log in
    pub fn is_active(&self) -> bool {
        self.status.can_login()
    }

    // Mutators

    /// Update the email
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.touch();
    }

    /// Update the display name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    /// Update the password hash
    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
        self.touch();
    }

    /// Update the system role
    pub fn set_role(&mut self, role: SystemRole) {
        self.role = role;
        self.touch();
    }

    /// Deactivate the user (soft delete)
    pub fn deactivate(&mut self) {
        self.status = UserStatus::Inactive;
        self.touch();
    }

    /// Reactivate a deactivated user
    pub fn activate(&mut self) {
        if self.status == UserStatus::Inactive {
            self.status = UserStatus::Active;
            self.touch();
        }
    }

    /// Assign the user to a team
    pub fn assign_team(&mut self, team_id: TeamId) {
        self.team_id = Some(team_id);
        self.touch();
    }

    /// Remove the user from their team
    pub fn leave_team(&mut self) {
        self.team_id = None;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for User {
    type Key = UserId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user(id: &str, email: &str) -> User {
        User::new(
            UserId::new(id).unwrap(),
            email,
            "Test User",
            "hashed_password",
            SystemRole::User,
        )
    }

    #[test]
    fn test_user_id_valid() {
        let id = UserId::new("carlos").unwrap();
        assert_eq!(id.as_str(), "carlos");
    }

    #[test]
    fn test_user_id_invalid() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("-user").is_err());
        assert!(UserId::new("user-").is_err());
    }

    #[test]
    fn test_user_id_generate() {
        let id = UserId::generate();
        assert!(id.as_str().starts_with("user-"));
    }

    #[test]
    fn test_system_role_privileges() {
        assert!(SystemRole::SuperAdmin.is_admin());
        assert!(SystemRole::Admin.is_admin());
        assert!(!SystemRole::Manager.is_admin());
        assert!(!SystemRole::User.is_admin());

        assert!(SystemRole::SuperAdmin.can_view_all_users());
        assert!(!SystemRole::Admin.can_view_all_users());
    }

    #[test]
    fn test_user_creation() {
        let user = test_user("carlos", "carlos@empresa.com");

        assert_eq!(user.email(), "carlos@empresa.com");
        assert_eq!(user.name(), "Test User");
        assert_eq!(user.role(), SystemRole::User);
        assert!(user.is_active());
        assert!(user.team_id().is_none());
    }

    #[test]
    fn test_user_status_changes() {
        let mut user = test_user("carlos", "carlos@empresa.com");

        user.deactivate();
        assert!(!user.is_active());

        user.activate();
        assert!(user.is_active());
    }

    #[test]
    fn test_user_team_assignment() {
        let mut user = test_user("carlos", "carlos@empresa.com");
        let team_id = TeamId::new("dev-team").unwrap();

        user.assign_team(team_id.clone());
        assert_eq!(user.team_id(), Some(&team_id));

        user.leave_team();
        assert!(user.team_id().is_none());
    }

    #[test]
    fn test_user_serialization_excludes_password() {
        let user = test_user("carlos", "carlos@empresa.com");

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hashed_password"));
        assert!(!json.contains("password_hash"));
    }

    #[test]
    fn test_user_update_touches_timestamp() {
        let mut user = test_user("carlos", "carlos@empresa.com");
        let original_updated = user.updated_at();

        std::thread::sleep(std::time::Duration::from_millis(10));

        user.set_role(SystemRole::Manager);
        assert_eq!(user.role(), SystemRole::Manager);
        assert!(user.updated_at() > original_updated);
    }
}
