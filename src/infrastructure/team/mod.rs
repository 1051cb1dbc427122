//! Team infrastructure - repository and service

mod repository;
mod service;

pub use repository::StorageTeamRepository;
pub use service::{CreateTeamInput, TeamDetail, TeamService};
