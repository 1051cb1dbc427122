//! Session infrastructure - repository and authentication service

mod repository;
mod service;

pub use repository::StorageSessionRepository;
pub use service::{AuthService, LoginOutcome, SignupInput};
