//! Membership domain - the team join request / invite lifecycle
//!
//! `TeamRequest` (user asks to join) and `TeamInvite` (team asks a user to
//! join) are created in a pending state and transition exactly once to a
//! terminal state. Approving a request or accepting an invite assigns the
//! user to the team and terminates every other pending item the user has,
//! so a user is never in two unresolved membership processes once one
//! resolves.

mod invite;
mod request;
mod store;

pub use invite::{InviteId, InviteStatus, TeamInvite};
pub use request::{RequestId, RequestStatus, TeamRequest};
pub use store::MembershipStore;
