//! Team management permission resolver
//!
//! Decides whether a user may manage a team's join requests and invites.
//! The team creator always may; anyone else qualifies by holding an active
//! role in that team whose name contains a leadership keyword,
//! case-insensitively. The match is substring-based: "QA Lead" qualifies
//! through "Lead". Pure read, no side effects, fails closed on missing
//! teams.

use std::sync::Arc;

use crate::domain::role::RoleRepository;
use crate::domain::team::{TeamId, TeamRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Role names that grant request/invite management
const LEADERSHIP_KEYWORDS: &[&str] = &[
    "Tech Lead",
    "Design Lead",
    "Marketing Manager",
    "Team Lead",
    "Manager",
    "Lead",
    "Coordinator",
    "Supervisor",
];

/// Resolves management permissions over a team
#[derive(Debug)]
pub struct PermissionResolver {
    teams: Arc<dyn TeamRepository>,
    roles: Arc<dyn RoleRepository>,
}

impl PermissionResolver {
    pub fn new(teams: Arc<dyn TeamRepository>, roles: Arc<dyn RoleRepository>) -> Self {
        Self { teams, roles }
    }

    /// Whether `user_id` may manage join requests and invites of `team_id`
    pub async fn can_manage_team_requests(
        &self,
        user_id: &UserId,
        team_id: &TeamId,
    ) -> Result<bool, DomainError> {
        let team = match self.teams.get(team_id).await? {
            Some(team) => team,
            // Unknown team: fail closed
            None => return Ok(false),
        };

        if team.created_by() == user_id {
            return Ok(true);
        }

        let roles = self.roles.roles_for_user_in_team(user_id, team_id).await?;

        Ok(roles
            .iter()
            .any(|role| is_leadership_role_name(role.name())))
    }
}

fn is_leadership_role_name(name: &str) -> bool {
    let name = name.to_lowercase();

    LEADERSHIP_KEYWORDS
        .iter()
        .any(|keyword| name.contains(&keyword.to_lowercase()))
}
