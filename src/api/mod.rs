//! API layer - axum router, state, extractors and handlers

pub mod audit;
pub mod auth;
pub mod health;
pub mod invites;
pub mod middleware;
pub mod requests;
pub mod router;
pub mod state;
pub mod teams;
pub mod types;
pub mod users;

pub use router::create_router;
pub use state::AppState;
