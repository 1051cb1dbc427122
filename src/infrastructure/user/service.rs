//! User service for account administration

use std::sync::Arc;

use tracing::info;

use crate::domain::audit::{AuditAction, AuditEvent};
use crate::domain::team::TeamId;
use crate::domain::user::{
    validate_email, validate_password, validate_user_name, SystemRole, User, UserId,
    UserRepository,
};
use crate::domain::DomainError;
use crate::infrastructure::audit::AuditRecorder;

use super::password::PasswordHasher;

/// Input for creating a new user through the admin surface
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: SystemRole,
    pub team_id: Option<TeamId>,
}

/// Input for updating a user; absent fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<SystemRole>,
    pub active: Option<bool>,
}

/// User administration service
#[derive(Debug)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    audit: Arc<AuditRecorder>,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        audit: Arc<AuditRecorder>,
    ) -> Self {
        Self {
            repository,
            hasher,
            audit,
        }
    }

    /// Create a new user on behalf of an administrator
    pub async fn create(&self, input: CreateUserInput, actor: &UserId) -> Result<User, DomainError> {
        info!(email = %input.email, "Creating user");

        validate_email(&input.email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_user_name(&input.name).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&input.password).map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.email_exists(&input.email).await? {
            return Err(DomainError::conflict(format!(
                "Email '{}' is already in use",
                input.email
            )));
        }

        let password_hash = self.hasher.hash(&input.password)?;
        let mut user = User::new(
            UserId::generate(),
            &input.email,
            &input.name,
            password_hash,
            input.role,
        );

        if let Some(team_id) = input.team_id {
            user.assign_team(team_id);
        }

        let user = self.repository.create(user).await?;

        self.audit
            .record(AuditEvent::user_created(actor.clone(), user.id()))
            .await;

        Ok(user)
    }

    /// Get a user by ID
    pub async fn get(&self, id: &str) -> Result<Option<User>, DomainError> {
        let user_id = UserId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        self.repository.get(&user_id).await
    }

    /// List every user on the platform
    pub async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        self.repository.list().await
    }

    /// List active members of a team
    pub async fn team_members(&self, team_id: &TeamId) -> Result<Vec<User>, DomainError> {
        self.repository.list_by_team(team_id).await
    }

    /// Update a user's profile, role or status
    pub async fn update(
        &self,
        id: &str,
        input: UpdateUserInput,
        actor: &UserId,
    ) -> Result<User, DomainError> {
        let user_id = UserId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let mut user = self
            .repository
            .get(&user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        let mut changes = serde_json::Map::new();

        if let Some(name) = input.name {
            validate_user_name(&name).map_err(|e| DomainError::validation(e.to_string()))?;
            user.set_name(&name);
            changes.insert("name".into(), name.into());
        }

        if let Some(email) = input.email {
            if email != user.email() {
                validate_email(&email).map_err(|e| DomainError::validation(e.to_string()))?;

                if self.repository.email_exists(&email).await? {
                    return Err(DomainError::conflict(format!(
                        "Email '{}' is already in use",
                        email
                    )));
                }

                user.set_email(&email);
                changes.insert("email".into(), email.into());
            }
        }

        let role_change = input.role.filter(|r| *r != user.role()).map(|new_role| {
            let old_role = user.role();
            user.set_role(new_role);
            (old_role, new_role)
        });

        let status_change = input.active.and_then(|active| {
            if active == user.is_active() {
                return None;
            }

            let old_status = user.is_active();

            if active {
                user.activate();
            } else {
                user.deactivate();
            }

            Some((old_status, active))
        });

        let user = self.repository.update(user).await?;

        if let Some((old_role, new_role)) = role_change {
            self.audit
                .record(AuditEvent::role_changed(
                    actor.clone(),
                    user.id(),
                    &old_role.to_string(),
                    &new_role.to_string(),
                ))
                .await;
        }

        if let Some((old_status, new_status)) = status_change {
            self.audit
                .record(AuditEvent::status_changed(
                    actor.clone(),
                    user.id(),
                    if old_status { "active" } else { "inactive" },
                    if new_status { "active" } else { "inactive" },
                ))
                .await;
        }

        if !changes.is_empty() {
            self.audit
                .record(AuditEvent::user_updated(
                    actor.clone(),
                    user.id(),
                    serde_json::Value::Object(changes),
                ))
                .await;
        }

        Ok(user)
    }

    /// Soft-delete a user: the account is deactivated, never removed
    pub async fn deactivate(&self, id: &str, actor: &UserId) -> Result<User, DomainError> {
        info!(id = %id, "Deactivating user");

        let user_id = UserId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let mut user = self
            .repository
            .get(&user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        user.deactivate();
        let user = self.repository.update(user).await?;

        self.audit
            .record(
                AuditEvent::new(
                    actor.clone(),
                    AuditAction::Delete,
                    "user",
                    "User deactivated",
                )
                .with_entity_id(user.id().as_str()),
            )
            .await;

        Ok(user)
    }

    /// Set a new password for a user
    pub async fn change_password(&self, id: &str, new_password: &str) -> Result<User, DomainError> {
        let user_id = UserId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let mut user = self
            .repository
            .get(&user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        validate_password(new_password).map_err(|e| DomainError::validation(e.to_string()))?;

        let hash = self.hasher.hash(new_password)?;
        user.set_password_hash(hash);

        self.repository.update(user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit::{AuditLog, AuditLogRepository, AuditQuery};
    use crate::infrastructure::audit::StorageAuditLogRepository;
    use crate::infrastructure::storage::InMemoryStorage;
    use crate::infrastructure::user::{Argon2Hasher, StorageUserRepository};

    struct Fixture {
        service: UserService,
        audit_repo: Arc<StorageAuditLogRepository>,
    }

    fn fixture() -> Fixture {
        let audit_repo = Arc::new(StorageAuditLogRepository::new(Arc::new(
            InMemoryStorage::<AuditLog>::new(),
        )));
        let service = UserService::new(
            Arc::new(StorageUserRepository::new(Arc::new(
                InMemoryStorage::<User>::new(),
            ))),
            Arc::new(Argon2Hasher::new()),
            Arc::new(AuditRecorder::new(audit_repo.clone())),
        );

        Fixture {
            service,
            audit_repo,
        }
    }

    fn actor() -> UserId {
        UserId::new("admin").unwrap()
    }

    fn input(email: &str, name: &str) -> CreateUserInput {
        CreateUserInput {
            email: email.to_string(),
            name: name.to_string(),
            password: "secret-password".to_string(),
            role: SystemRole::User,
            team_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_user() {
        let fx = fixture();

        let user = fx
            .service
            .create(input("ana@empresa.com", "Ana"), &actor())
            .await
            .unwrap();

        assert_eq!(user.email(), "ana@empresa.com");
        assert_eq!(user.role(), SystemRole::User);
        assert!(user.team_id().is_none());
        // Password is stored hashed
        assert_ne!(user.password_hash(), "secret-password");
    }

    #[tokio::test]
    async fn test_create_duplicate_email() {
        let fx = fixture();

        fx.service
            .create(input("ana@empresa.com", "Ana"), &actor())
            .await
            .unwrap();

        let result = fx
            .service
            .create(input("ana@empresa.com", "Outra Ana"), &actor())
            .await;

        assert!(matches!(result.unwrap_err(), DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_create_invalid_input() {
        let fx = fixture();

        let mut bad_email = input("not-an-email", "Ana");
        assert!(fx.service.create(bad_email.clone(), &actor()).await.is_err());

        bad_email = input("ana@empresa.com", "Ana");
        bad_email.password = "short".to_string();
        assert!(fx.service.create(bad_email, &actor()).await.is_err());
    }

    #[tokio::test]
    async fn test_update_role_writes_audit() {
        let fx = fixture();

        let user = fx
            .service
            .create(input("ana@empresa.com", "Ana"), &actor())
            .await
            .unwrap();

        let updated = fx
            .service
            .update(
                user.id().as_str(),
                UpdateUserInput {
                    role: Some(SystemRole::Admin),
                    ..Default::default()
                },
                &actor(),
            )
            .await
            .unwrap();

        assert_eq!(updated.role(), SystemRole::Admin);

        let entries = fx
            .audit_repo
            .list(&AuditQuery::new().with_action(AuditAction::RoleChanged))
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entity_id(), Some(user.id().as_str()));
    }

    #[tokio::test]
    async fn test_update_email_conflict() {
        let fx = fixture();

        fx.service
            .create(input("ana@empresa.com", "Ana"), &actor())
            .await
            .unwrap();
        let user = fx
            .service
            .create(input("joao@empresa.com", "Joao"), &actor())
            .await
            .unwrap();

        let result = fx
            .service
            .update(
                user.id().as_str(),
                UpdateUserInput {
                    email: Some("ana@empresa.com".to_string()),
                    ..Default::default()
                },
                &actor(),
            )
            .await;

        assert!(matches!(result.unwrap_err(), DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_deactivate_is_soft() {
        let fx = fixture();

        let user = fx
            .service
            .create(input("ana@empresa.com", "Ana"), &actor())
            .await
            .unwrap();

        let deactivated = fx
            .service
            .deactivate(user.id().as_str(), &actor())
            .await
            .unwrap();
        assert!(!deactivated.is_active());

        // Still retrievable
        let fetched = fx.service.get(user.id().as_str()).await.unwrap();
        assert!(fetched.is_some());
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let fx = fixture();

        let result = fx
            .service
            .update("ghost", UpdateUserInput::default(), &actor())
            .await;

        assert!(matches!(result.unwrap_err(), DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_change_password() {
        let fx = fixture();

        let user = fx
            .service
            .create(input("ana@empresa.com", "Ana"), &actor())
            .await
            .unwrap();
        let old_hash = user.password_hash().to_string();

        let updated = fx
            .service
            .change_password(user.id().as_str(), "brand-new-password")
            .await
            .unwrap();

        assert_ne!(updated.password_hash(), old_hash);
    }
}
