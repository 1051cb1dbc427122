//! User domain - identities, system roles and team assignment

mod entity;
mod repository;
mod validation;

pub use entity::{SystemRole, User, UserId, UserStatus};
pub use repository::UserRepository;
pub use validation::{
    validate_email, validate_password, validate_user_id, validate_user_name, UserValidationError,
};
