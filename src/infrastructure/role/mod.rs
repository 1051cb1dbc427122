//! Role infrastructure - repository and service

mod repository;
mod service;

pub use repository::StorageRoleRepository;
pub use service::{CreateRoleInput, RoleService};
