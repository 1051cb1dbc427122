//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::{
    AuditService, AuthService, MembershipService, PermissionResolver, RateLimiter, RoleService,
    TeamService, UserService,
};

/// Shared services handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub team_service: Arc<TeamService>,
    pub role_service: Arc<RoleService>,
    pub membership_service: Arc<MembershipService>,
    pub permission_resolver: Arc<PermissionResolver>,
    pub audit_service: Arc<AuditService>,
    /// Limits login/signup attempts per client
    pub auth_rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        auth_service: Arc<AuthService>,
        user_service: Arc<UserService>,
        team_service: Arc<TeamService>,
        role_service: Arc<RoleService>,
        membership_service: Arc<MembershipService>,
        permission_resolver: Arc<PermissionResolver>,
        audit_service: Arc<AuditService>,
        auth_rate_limiter: Arc<RateLimiter>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            team_service,
            role_service,
            membership_service,
            permission_resolver,
            audit_service,
            auth_rate_limiter,
        }
    }
}
