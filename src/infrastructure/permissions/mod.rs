//! Permission resolution for team management actions

mod resolver;

pub use resolver::PermissionResolver;
