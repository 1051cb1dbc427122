//! Roster API
//!
//! Team membership administration backend: users sign up, create teams,
//! request to join or get invited, and team managers resolve those
//! requests under a single-team-per-user rule. Every state change leaves
//! an audit trail entry.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use rand::Rng;
use tracing::info;

use api::AppState;
use domain::audit::AuditLog;
use domain::role::{RoleAssignment, TeamRole};
use domain::session::Session;
use domain::team::Team;
use domain::user::{SystemRole, User, UserId};
use infrastructure::{
    AuditRecorder, AuditService, AuthService, CreateUserInput, InMemoryMembershipStore,
    InMemoryStorage, MembershipService, PermissionResolver, RateLimitPolicy, RateLimiter,
    RoleService, StorageAuditLogRepository, StorageRoleRepository, StorageSessionRepository,
    StorageTeamRepository, StorageUserRepository, TeamService, UserService,
};

/// Create the application state with all services initialized
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let user_storage = Arc::new(InMemoryStorage::<User>::new());
    let team_storage = Arc::new(InMemoryStorage::<Team>::new());
    let role_storage = Arc::new(InMemoryStorage::<TeamRole>::new());
    let assignment_storage = Arc::new(InMemoryStorage::<RoleAssignment>::new());
    let session_storage = Arc::new(InMemoryStorage::<Session>::new());
    let audit_storage = Arc::new(InMemoryStorage::<AuditLog>::new());

    let users = Arc::new(StorageUserRepository::new(user_storage.clone()));
    let teams = Arc::new(StorageTeamRepository::new(team_storage));
    let roles = Arc::new(StorageRoleRepository::new(role_storage, assignment_storage));
    let sessions = Arc::new(StorageSessionRepository::new(session_storage));
    let audit_repository = Arc::new(StorageAuditLogRepository::new(audit_storage));

    let audit_recorder = Arc::new(AuditRecorder::new(audit_repository.clone()));
    let hasher = Arc::new(infrastructure::Argon2Hasher::new());

    let auth_service = Arc::new(AuthService::new(
        users.clone(),
        sessions,
        hasher.clone(),
        audit_recorder.clone(),
        config.auth.session_ttl_hours,
    ));
    let user_service = Arc::new(UserService::new(
        users.clone(),
        hasher,
        audit_recorder.clone(),
    ));
    let team_service = Arc::new(TeamService::new(
        teams.clone(),
        users.clone(),
        roles.clone(),
        audit_recorder.clone(),
    ));
    let role_service = Arc::new(RoleService::new(
        roles.clone(),
        teams.clone(),
        users.clone(),
        audit_recorder.clone(),
    ));

    // The membership store shares the user storage so approvals commit the
    // team assignment inside the store's own transaction boundary.
    let membership_store = Arc::new(InMemoryMembershipStore::new(user_storage));
    let membership_service = Arc::new(MembershipService::new(
        membership_store,
        teams.clone(),
        users.clone(),
        audit_recorder,
    ));

    let permission_resolver = Arc::new(PermissionResolver::new(teams, roles));
    let audit_service = Arc::new(AuditService::new(audit_repository));

    let auth_rate_limiter = Arc::new(RateLimiter::new(RateLimitPolicy::new(
        std::time::Duration::from_secs(config.rate_limit.auth_window_secs),
        config.rate_limit.auth_max_requests,
    )));

    bootstrap_super_admin(&user_service).await?;

    Ok(AppState::new(
        auth_service,
        user_service,
        team_service,
        role_service,
        membership_service,
        permission_resolver,
        audit_service,
        auth_rate_limiter,
    ))
}

/// Create the initial super admin if no users exist yet
async fn bootstrap_super_admin(user_service: &UserService) -> anyhow::Result<()> {
    if !user_service.list_all().await?.is_empty() {
        return Ok(());
    }

    let (password, from_env) = match std::env::var("ADMIN_DEFAULT_PASSWORD") {
        Ok(p) if !p.is_empty() => (p, true),
        _ => (generate_random_password(), false),
    };

    let email =
        std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@roster.local".to_string());

    let actor = UserId::generate();
    let admin = user_service
        .create(
            CreateUserInput {
                email: email.clone(),
                name: "Administrator".to_string(),
                password: password.clone(),
                role: SystemRole::SuperAdmin,
                team_id: None,
            },
            &actor,
        )
        .await?;

    info!("===========================================");
    info!("Initial super admin created!");
    info!("Email: {}", email);

    if from_env {
        info!("Password: (set via ADMIN_DEFAULT_PASSWORD)");
    } else {
        info!("Password: {}", password);
    }

    info!("Please change this password after first login.");
    info!("Admin user id: {}", admin.id());
    info!("===========================================");

    Ok(())
}

/// Generate a random password for the initial super admin
fn generate_random_password() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}
