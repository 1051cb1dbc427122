//! Membership store trait
//!
//! The store owns every pending and resolved request/invite plus the user
//! directory handle, and exposes the compound transitions as single
//! operations. That keeps the terminal-state re-check, the user's team
//! assignment, and the cascade over the user's other pending items inside
//! one transaction boundary instead of a sequence of independent writes.

use async_trait::async_trait;

use super::invite::{InviteId, InviteStatus, TeamInvite};
use super::request::{RequestId, RequestStatus, TeamRequest};
use crate::domain::team::TeamId;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Store for team join requests and invites
#[async_trait]
pub trait MembershipStore: Send + Sync + std::fmt::Debug {
    /// Insert a new pending request.
    ///
    /// Fails with `DuplicateRequest` if the user already has a pending
    /// request for this team. Pending invites for the same pair are not
    /// considered.
    async fn insert_request(&self, request: TeamRequest) -> Result<TeamRequest, DomainError>;

    /// Insert a new pending invite.
    ///
    /// Fails with `DuplicateInvite` if the user already has a pending
    /// invite for this team.
    async fn insert_invite(&self, invite: TeamInvite) -> Result<TeamInvite, DomainError>;

    /// Get a request by ID
    async fn request(&self, id: &RequestId) -> Result<Option<TeamRequest>, DomainError>;

    /// Get an invite by ID
    async fn invite(&self, id: &InviteId) -> Result<Option<TeamInvite>, DomainError>;

    /// Pending requests for a team, newest first
    async fn pending_team_requests(&self, team_id: &TeamId)
        -> Result<Vec<TeamRequest>, DomainError>;

    /// Pending invites for a team, newest first
    async fn pending_team_invites(&self, team_id: &TeamId) -> Result<Vec<TeamInvite>, DomainError>;

    /// Pending requests created by a user, newest first
    async fn pending_user_requests(&self, user_id: &UserId)
        -> Result<Vec<TeamRequest>, DomainError>;

    /// Pending invites addressed to a user, newest first
    async fn pending_user_invites(&self, user_id: &UserId) -> Result<Vec<TeamInvite>, DomainError>;

    /// Move a pending request to a terminal state without side effects.
    ///
    /// Fails with `NotFound` if absent, `AlreadyProcessed` if not pending.
    /// Used for reject and cancel; approval goes through `approve_request`.
    async fn resolve_request(
        &self,
        id: &RequestId,
        status: RequestStatus,
    ) -> Result<TeamRequest, DomainError>;

    /// Move a pending invite to a terminal state without side effects.
    async fn resolve_invite(
        &self,
        id: &InviteId,
        status: InviteStatus,
    ) -> Result<TeamInvite, DomainError>;

    /// Approve a pending request as one atomic unit: the request becomes
    /// approved, the user is assigned to the team, every other pending
    /// request of the user is rejected, and every pending invite of the
    /// user is declined.
    ///
    /// Fails with `NotFound`, `AlreadyProcessed`, or `UserAlreadyInTeam`
    /// (when the user already belongs to any team, including this one).
    async fn approve_request(&self, id: &RequestId) -> Result<TeamRequest, DomainError>;

    /// Accept a pending invite as one atomic unit, symmetric to
    /// `approve_request`: the invite becomes accepted, the user is assigned
    /// to the team, every pending request of the user is rejected, and every
    /// OTHER pending invite of the user is declined.
    async fn accept_invite(&self, id: &InviteId) -> Result<TeamInvite, DomainError>;
}
