//! Request extractors for authentication

mod auth;

pub use auth::{extract_session_token, request_origin, CurrentUser, RequireAdmin};
