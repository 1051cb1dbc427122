//! Membership state machine service
//!
//! Drives the request/invite lifecycle on top of the membership store and
//! emits audit events as a side effect. Permission checks happen in the
//! caller (route handlers ask the permission resolver first); this service
//! only enforces the lifecycle invariants themselves.

use std::sync::Arc;

use tracing::info;

use crate::domain::audit::AuditEvent;
use crate::domain::membership::{
    InviteId, InviteStatus, MembershipStore, RequestId, RequestStatus, TeamInvite, TeamRequest,
};
use crate::domain::team::{TeamId, TeamRepository};
use crate::domain::user::{UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::audit::AuditRecorder;

/// Team membership request/invite lifecycle
#[derive(Debug)]
pub struct MembershipService {
    store: Arc<dyn MembershipStore>,
    teams: Arc<dyn TeamRepository>,
    users: Arc<dyn UserRepository>,
    audit: Arc<AuditRecorder>,
}

impl MembershipService {
    pub fn new(
        store: Arc<dyn MembershipStore>,
        teams: Arc<dyn TeamRepository>,
        users: Arc<dyn UserRepository>,
        audit: Arc<AuditRecorder>,
    ) -> Self {
        Self {
            store,
            teams,
            users,
            audit,
        }
    }

    /// A user asks to join a team.
    ///
    /// Only one pending request may exist per (team, user) pair. A pending
    /// invite for the same pair does not block the request.
    pub async fn create_request(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
        message: Option<String>,
    ) -> Result<TeamRequest, DomainError> {
        let team = self
            .teams
            .get(team_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Team '{}' not found", team_id)))?;

        if !team.status().is_active() {
            return Err(DomainError::validation(format!(
                "Team '{}' is not accepting requests",
                team.name()
            )));
        }

        if self.users.get(user_id).await?.is_none() {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                user_id
            )));
        }

        let request = self
            .store
            .insert_request(TeamRequest::new(team_id.clone(), user_id.clone(), message))
            .await?;

        info!(request = %request.id(), team = %team_id, user = %user_id, "Join request created");

        self.audit
            .record(AuditEvent::request_sent(user_id.clone(), team_id.clone()))
            .await;

        Ok(request)
    }

    /// A team invites a user to join.
    pub async fn create_invite(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
        invited_by: &UserId,
        message: Option<String>,
    ) -> Result<TeamInvite, DomainError> {
        let team = self
            .teams
            .get(team_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Team '{}' not found", team_id)))?;

        if !team.status().is_active() {
            return Err(DomainError::validation(format!(
                "Team '{}' is not accepting invites",
                team.name()
            )));
        }

        if self.users.get(user_id).await?.is_none() {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                user_id
            )));
        }

        let invite = self
            .store
            .insert_invite(TeamInvite::new(
                team_id.clone(),
                user_id.clone(),
                invited_by.clone(),
                message,
            ))
            .await?;

        info!(invite = %invite.id(), team = %team_id, user = %user_id, "Invite created");

        self.audit
            .record(AuditEvent::invite_sent(
                invited_by.clone(),
                user_id,
                team_id.clone(),
            ))
            .await;

        Ok(invite)
    }

    /// Get a request by ID
    pub async fn request(&self, id: &RequestId) -> Result<Option<TeamRequest>, DomainError> {
        self.store.request(id).await
    }

    /// Get an invite by ID
    pub async fn invite(&self, id: &InviteId) -> Result<Option<TeamInvite>, DomainError> {
        self.store.invite(id).await
    }

    /// Approve a pending request. The requester joins the team and every
    /// other pending request/invite they hold is terminated, atomically.
    pub async fn approve_request(
        &self,
        id: &RequestId,
        actor: &UserId,
    ) -> Result<TeamRequest, DomainError> {
        let approved = self.store.approve_request(id).await?;

        info!(request = %id, team = %approved.team_id(), "Join request approved");

        self.audit
            .record(AuditEvent::request_approved(
                actor.clone(),
                approved.user_id(),
                approved.team_id().clone(),
            ))
            .await;

        Ok(approved)
    }

    /// Reject a pending request. No cascade.
    pub async fn reject_request(
        &self,
        id: &RequestId,
        actor: &UserId,
    ) -> Result<TeamRequest, DomainError> {
        let rejected = self
            .store
            .resolve_request(id, RequestStatus::Rejected)
            .await?;

        info!(request = %id, "Join request rejected");

        self.audit
            .record(AuditEvent::request_rejected(
                actor.clone(),
                rejected.user_id(),
                rejected.team_id().clone(),
            ))
            .await;

        Ok(rejected)
    }

    /// Cancel a pending request. Shares the rejected terminal state with
    /// `reject_request`; there is no separate cancelled status.
    pub async fn cancel_request(
        &self,
        id: &RequestId,
        actor: &UserId,
    ) -> Result<TeamRequest, DomainError> {
        let cancelled = self
            .store
            .resolve_request(id, RequestStatus::Rejected)
            .await?;

        info!(request = %id, "Join request cancelled");

        self.audit
            .record(AuditEvent::request_cancelled(
                actor.clone(),
                cancelled.team_id().clone(),
            ))
            .await;

        Ok(cancelled)
    }

    /// Accept a pending invite, symmetric to `approve_request`.
    pub async fn accept_invite(&self, id: &InviteId) -> Result<TeamInvite, DomainError> {
        let accepted = self.store.accept_invite(id).await?;

        info!(invite = %id, team = %accepted.team_id(), "Invite accepted");

        self.audit
            .record(AuditEvent::invite_accepted(
                accepted.user_id().clone(),
                accepted.team_id().clone(),
            ))
            .await;

        Ok(accepted)
    }

    /// Decline a pending invite. No cascade.
    pub async fn decline_invite(&self, id: &InviteId) -> Result<TeamInvite, DomainError> {
        let declined = self
            .store
            .resolve_invite(id, InviteStatus::Declined)
            .await?;

        info!(invite = %id, "Invite declined");

        self.audit
            .record(AuditEvent::invite_declined(
                declined.user_id().clone(),
                declined.team_id().clone(),
            ))
            .await;

        Ok(declined)
    }

    /// Pending requests for a team, newest first
    pub async fn team_requests(&self, team_id: &TeamId) -> Result<Vec<TeamRequest>, DomainError> {
        self.store.pending_team_requests(team_id).await
    }

    /// Pending invites for a team, newest first
    pub async fn team_invites(&self, team_id: &TeamId) -> Result<Vec<TeamInvite>, DomainError> {
        self.store.pending_team_invites(team_id).await
    }

    /// Pending requests created by a user, newest first
    pub async fn user_requests(&self, user_id: &UserId) -> Result<Vec<TeamRequest>, DomainError> {
        self.store.pending_user_requests(user_id).await
    }

    /// Pending invites addressed to a user, newest first
    pub async fn user_invites(&self, user_id: &UserId) -> Result<Vec<TeamInvite>, DomainError> {
        self.store.pending_user_invites(user_id).await
    }
}
