//! User infrastructure - password hashing, repository and service

mod password;
mod repository;
mod service;

pub use password::{Argon2Hasher, PasswordHasher};
pub use repository::StorageUserRepository;
pub use service::{CreateUserInput, UpdateUserInput, UserService};
