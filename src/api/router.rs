use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::state::AppState;
use super::{audit, auth, health, invites, requests, teams, users};

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Authentication
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/session", get(auth::session))
        // Membership: requests and invites (fixed paths before :id routes)
        .route(
            "/teams/requests",
            get(requests::list_own_requests).post(requests::create_request),
        )
        .route("/teams/requests/{id}", put(requests::resolve_request))
        .route(
            "/teams/invites",
            get(invites::list_own_invites).post(invites::create_invite),
        )
        .route("/teams/invites/{id}", put(invites::resolve_invite))
        // Teams
        .route("/teams", get(teams::list_teams).post(teams::create_team))
        .route("/teams/{id}", get(teams::get_team))
        .route("/teams/{id}/requests", get(teams::list_team_requests))
        .route("/teams/{id}/invites", get(teams::list_team_invites))
        .route(
            "/teams/{id}/roles",
            get(teams::list_team_roles).post(teams::create_team_role),
        )
        .route(
            "/teams/{id}/roles/{role_id}/assign",
            post(teams::assign_team_role),
        )
        // Users
        .route(
            "/users",
            get(users::list_team_members).post(users::create_user),
        )
        .route("/users/all", get(users::list_all_users))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        // Audit trail
        .route("/audit-logs", get(audit::list_audit_logs))
        // State and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
