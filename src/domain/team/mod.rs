//! Team domain - teams and their lifecycle

mod entity;
mod repository;
mod validation;

pub use entity::{Team, TeamId, TeamStatus};
pub use repository::TeamRepository;
pub use validation::{validate_team_id, validate_team_name, TeamValidationError};
