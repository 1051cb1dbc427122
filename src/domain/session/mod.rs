//! Session domain - opaque bearer tokens mapping to users

mod entity;
mod repository;

pub use entity::{Session, SessionToken};
pub use repository::SessionRepository;
