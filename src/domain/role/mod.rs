//! Role domain - per-team named roles and their assignments

mod entity;
mod repository;

pub use entity::{AssignmentId, RoleAssignment, RoleId, RoleStatus, TeamRole};
pub use repository::RoleRepository;
