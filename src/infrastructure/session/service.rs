//! Authentication service
//!
//! Sessions are opaque random tokens stored server-side; the token carries
//! no claims. The rest of the system consumes the resolved identity only.

use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::Rng;
use tracing::info;

use crate::domain::audit::{AuditEvent, RequestOrigin};
use crate::domain::session::{Session, SessionRepository, SessionToken};
use crate::domain::user::{
    validate_email, validate_password, validate_user_name, SystemRole, User, UserId,
    UserRepository,
};
use crate::domain::DomainError;
use crate::infrastructure::audit::AuditRecorder;
use crate::infrastructure::user::PasswordHasher;

const TOKEN_LENGTH: usize = 48;

/// Input for self-service signup
#[derive(Debug, Clone)]
pub struct SignupInput {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub session: Session,
    pub user: User,
}

/// Signup, login, logout and session resolution
#[derive(Debug)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    hasher: Arc<dyn PasswordHasher>,
    audit: Arc<AuditRecorder>,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        hasher: Arc<dyn PasswordHasher>,
        audit: Arc<AuditRecorder>,
        session_ttl_hours: u64,
    ) -> Self {
        Self {
            users,
            sessions,
            hasher,
            audit,
            session_ttl: Duration::hours(session_ttl_hours as i64),
        }
    }

    /// Register a new user account with the default role
    pub async fn signup(&self, input: SignupInput) -> Result<User, DomainError> {
        validate_email(&input.email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_user_name(&input.name).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&input.password).map_err(|e| DomainError::validation(e.to_string()))?;

        if self.users.email_exists(&input.email).await? {
            return Err(DomainError::conflict(format!(
                "A user with email '{}' already exists",
                input.email
            )));
        }

        let password_hash = self.hasher.hash(&input.password)?;
        let user = User::new(
            UserId::generate(),
            &input.email,
            &input.name,
            password_hash,
            SystemRole::User,
        );

        let user = self.users.create(user).await?;
        info!(id = %user.id(), "User signed up");

        self.audit
            .record(AuditEvent::user_created(user.id().clone(), user.id()))
            .await;

        Ok(user)
    }

    /// Authenticate with email and password.
    ///
    /// Returns `Ok(None)` for unknown email, wrong password, or an inactive
    /// account; callers cannot distinguish which.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        origin: RequestOrigin,
    ) -> Result<Option<LoginOutcome>, DomainError> {
        let user = match self.users.get_by_email(email).await? {
            Some(u) => u,
            None => return Ok(None),
        };

        if !user.is_active() {
            return Ok(None);
        }

        if !self.hasher.verify(password, user.password_hash()) {
            return Ok(None);
        }

        let token = SessionToken::new(generate_token());
        let session = Session::new(token, user.id().clone(), Utc::now() + self.session_ttl);
        let session = self.sessions.create(session).await?;

        info!(user = %user.id(), "User logged in");

        self.audit
            .record(AuditEvent::login(user.id().clone()).with_origin(origin))
            .await;

        Ok(Some(LoginOutcome { session, user }))
    }

    /// Destroy a session. Unknown tokens are a no-op.
    pub async fn logout(&self, token: &str, origin: RequestOrigin) -> Result<(), DomainError> {
        let token = SessionToken::new(token);

        if let Some(session) = self.sessions.get(&token).await? {
            self.sessions.delete(&token).await?;

            self.audit
                .record(AuditEvent::logout(session.user_id().clone()).with_origin(origin))
                .await;
        }

        Ok(())
    }

    /// Resolve a session token into its user.
    ///
    /// Returns `None` for unknown or expired tokens and for users that have
    /// been deactivated since the session was issued. Expired sessions are
    /// dropped on sight.
    pub async fn session_user(&self, token: &str) -> Result<Option<User>, DomainError> {
        let token = SessionToken::new(token);

        let session = match self.sessions.get(&token).await? {
            Some(s) => s,
            None => return Ok(None),
        };

        if session.is_expired(Utc::now()) {
            self.sessions.delete(&token).await?;
            return Ok(None);
        }

        let user = match self.users.get(session.user_id()).await? {
            Some(u) => u,
            None => return Ok(None),
        };

        if !user.is_active() {
            return Ok(None);
        }

        Ok(Some(user))
    }
}

/// Random alphanumeric session token
fn generate_token() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}
