//! In-memory membership store
//!
//! Requests, invites, and the user directory handle sit behind a single
//! write lock. Every membership mutation - including the user's team
//! assignment during approval/acceptance - runs inside that critical
//! section, so the pending re-check, the assignment, and the cascade over
//! the user's other pending items commit as one unit. The loser of two
//! concurrent approvals for the same user observes `AlreadyProcessed` or
//! `UserAlreadyInTeam`, never a partial cascade.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::membership::{
    InviteId, InviteStatus, MembershipStore, RequestId, RequestStatus, TeamInvite, TeamRequest,
};
use crate::domain::storage::Storage;
use crate::domain::team::TeamId;
use crate::domain::user::{User, UserId};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct MembershipState {
    requests: HashMap<String, TeamRequest>,
    invites: HashMap<String, TeamInvite>,
}

/// In-memory implementation of MembershipStore
#[derive(Debug)]
pub struct InMemoryMembershipStore {
    users: Arc<dyn Storage<User>>,
    state: RwLock<MembershipState>,
}

impl InMemoryMembershipStore {
    /// Create a store that assigns users through the given user storage
    pub fn new(users: Arc<dyn Storage<User>>) -> Self {
        Self {
            users,
            state: RwLock::new(MembershipState::default()),
        }
    }
}

fn newest_first_requests(mut items: Vec<TeamRequest>) -> Vec<TeamRequest> {
    items.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    items
}

fn newest_first_invites(mut items: Vec<TeamInvite>) -> Vec<TeamInvite> {
    items.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    items
}

#[async_trait]
impl MembershipStore for InMemoryMembershipStore {
    async fn insert_request(&self, request: TeamRequest) -> Result<TeamRequest, DomainError> {
        let mut state = self.state.write().await;

        let duplicate = state.requests.values().any(|r| {
            r.is_pending() && r.team_id() == request.team_id() && r.user_id() == request.user_id()
        });

        if duplicate {
            return Err(DomainError::duplicate_request(format!(
                "User '{}' already has a pending request for team '{}'",
                request.user_id(),
                request.team_id()
            )));
        }

        state
            .requests
            .insert(request.id().as_str().to_string(), request.clone());
        Ok(request)
    }

    async fn insert_invite(&self, invite: TeamInvite) -> Result<TeamInvite, DomainError> {
        let mut state = self.state.write().await;

        let duplicate = state.invites.values().any(|i| {
            i.is_pending() && i.team_id() == invite.team_id() && i.user_id() == invite.user_id()
        });

        if duplicate {
            return Err(DomainError::duplicate_invite(format!(
                "User '{}' already has a pending invite for team '{}'",
                invite.user_id(),
                invite.team_id()
            )));
        }

        state
            .invites
            .insert(invite.id().as_str().to_string(), invite.clone());
        Ok(invite)
    }

    async fn request(&self, id: &RequestId) -> Result<Option<TeamRequest>, DomainError> {
        let state = self.state.read().await;
        Ok(state.requests.get(id.as_str()).cloned())
    }

    async fn invite(&self, id: &InviteId) -> Result<Option<TeamInvite>, DomainError> {
        let state = self.state.read().await;
        Ok(state.invites.get(id.as_str()).cloned())
    }

    async fn pending_team_requests(
        &self,
        team_id: &TeamId,
    ) -> Result<Vec<TeamRequest>, DomainError> {
        let state = self.state.read().await;
        Ok(newest_first_requests(
            state
                .requests
                .values()
                .filter(|r| r.is_pending() && r.team_id() == team_id)
                .cloned()
                .collect(),
        ))
    }

    async fn pending_team_invites(&self, team_id: &TeamId) -> Result<Vec<TeamInvite>, DomainError> {
        let state = self.state.read().await;
        Ok(newest_first_invites(
            state
                .invites
                .values()
                .filter(|i| i.is_pending() && i.team_id() == team_id)
                .cloned()
                .collect(),
        ))
    }

    async fn pending_user_requests(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<TeamRequest>, DomainError> {
        let state = self.state.read().await;
        Ok(newest_first_requests(
            state
                .requests
                .values()
                .filter(|r| r.is_pending() && r.user_id() == user_id)
                .cloned()
                .collect(),
        ))
    }

    async fn pending_user_invites(&self, user_id: &UserId) -> Result<Vec<TeamInvite>, DomainError> {
        let state = self.state.read().await;
        Ok(newest_first_invites(
            state
                .invites
                .values()
                .filter(|i| i.is_pending() && i.user_id() == user_id)
                .cloned()
                .collect(),
        ))
    }

    async fn resolve_request(
        &self,
        id: &RequestId,
        status: RequestStatus,
    ) -> Result<TeamRequest, DomainError> {
        if !status.is_terminal() {
            return Err(DomainError::validation(
                "Requests can only be resolved to a terminal status",
            ));
        }

        let mut state = self.state.write().await;

        let request = state
            .requests
            .get_mut(id.as_str())
            .ok_or_else(|| DomainError::not_found(format!("Request '{}' not found", id)))?;

        if !request.is_pending() {
            return Err(DomainError::already_processed(format!(
                "Request '{}' was already processed",
                id
            )));
        }

        request.resolve(status);
        Ok(request.clone())
    }

    async fn resolve_invite(
        &self,
        id: &InviteId,
        status: InviteStatus,
    ) -> Result<TeamInvite, DomainError> {
        if !status.is_terminal() {
            return Err(DomainError::validation(
                "Invites can only be resolved to a terminal status",
            ));
        }

        let mut state = self.state.write().await;

        let invite = state
            .invites
            .get_mut(id.as_str())
            .ok_or_else(|| DomainError::not_found(format!("Invite '{}' not found", id)))?;

        if !invite.is_pending() {
            return Err(DomainError::already_processed(format!(
                "Invite '{}' was already processed",
                id
            )));
        }

        invite.resolve(status);
        Ok(invite.clone())
    }

    async fn approve_request(&self, id: &RequestId) -> Result<TeamRequest, DomainError> {
        let mut state = self.state.write().await;

        let request = state
            .requests
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("Request '{}' not found", id)))?;

        if !request.is_pending() {
            return Err(DomainError::already_processed(format!(
                "Request '{}' was already processed",
                id
            )));
        }

        let mut user = self
            .users
            .get(request.user_id())
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!("User '{}' not found", request.user_id()))
            })?;

        if user.team_id().is_some() {
            return Err(DomainError::user_already_in_team(format!(
                "User '{}' already belongs to a team",
                user.id()
            )));
        }

        // Point of no return: everything below mutates under the same lock.
        let user_id = request.user_id().clone();
        let request_id = request.id().clone();

        let approved = {
            let Some(entry) = state.requests.get_mut(request_id.as_str()) else {
                return Err(DomainError::internal("request vanished during approval"));
            };
            entry.resolve(RequestStatus::Approved);
            entry.clone()
        };

        for other in state
            .requests
            .values_mut()
            .filter(|r| r.is_pending() && r.user_id() == &user_id && r.id() != &request_id)
        {
            other.resolve(RequestStatus::Rejected);
        }

        for invite in state
            .invites
            .values_mut()
            .filter(|i| i.is_pending() && i.user_id() == &user_id)
        {
            invite.resolve(InviteStatus::Declined);
        }

        user.assign_team(approved.team_id().clone());
        self.users.update(user).await?;

        Ok(approved)
    }

    async fn accept_invite(&self, id: &InviteId) -> Result<TeamInvite, DomainError> {
        let mut state = self.state.write().await;

        let invite = state
            .invites
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("Invite '{}' not found", id)))?;

        if !invite.is_pending() {
            return Err(DomainError::already_processed(format!(
                "Invite '{}' was already processed",
                id
            )));
        }

        let mut user = self.users.get(invite.user_id()).await?.ok_or_else(|| {
            DomainError::not_found(format!("User '{}' not found", invite.user_id()))
        })?;

        if user.team_id().is_some() {
            return Err(DomainError::user_already_in_team(format!(
                "User '{}' already belongs to a team",
                user.id()
            )));
        }

        let user_id = invite.user_id().clone();
        let invite_id = invite.id().clone();

        let accepted = {
            let Some(entry) = state.invites.get_mut(invite_id.as_str()) else {
                return Err(DomainError::internal("invite vanished during acceptance"));
            };
            entry.resolve(InviteStatus::Accepted);
            entry.clone()
        };

        for request in state
            .requests
            .values_mut()
            .filter(|r| r.is_pending() && r.user_id() == &user_id)
        {
            request.resolve(RequestStatus::Rejected);
        }

        for other in state
            .invites
            .values_mut()
            .filter(|i| i.is_pending() && i.user_id() == &user_id && i.id() != &invite_id)
        {
            other.resolve(InviteStatus::Declined);
        }

        user.assign_team(accepted.team_id().clone());
        self.users.update(user).await?;

        Ok(accepted)
    }
}
