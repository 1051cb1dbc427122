use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid ID format: {message}")]
    InvalidId { message: String },

    #[error("Duplicate request: {message}")]
    DuplicateRequest { message: String },

    #[error("Duplicate invite: {message}")]
    DuplicateInvite { message: String },

    #[error("Already processed: {message}")]
    AlreadyProcessed { message: String },

    #[error("User already in a team: {message}")]
    UserAlreadyInTeam { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
        }
    }

    pub fn duplicate_request(message: impl Into<String>) -> Self {
        Self::DuplicateRequest {
            message: message.into(),
        }
    }

    pub fn duplicate_invite(message: impl Into<String>) -> Self {
        Self::DuplicateInvite {
            message: message.into(),
        }
    }

    pub fn already_processed(message: impl Into<String>) -> Self {
        Self::AlreadyProcessed {
            message: message.into(),
        }
    }

    pub fn user_already_in_team(message: impl Into<String>) -> Self {
        Self::UserAlreadyInTeam {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("Team 'team-x' not found");
        assert_eq!(error.to_string(), "Not found: Team 'team-x' not found");
    }

    #[test]
    fn test_duplicate_request_error() {
        let error = DomainError::duplicate_request("A pending request already exists");
        assert_eq!(
            error.to_string(),
            "Duplicate request: A pending request already exists"
        );
    }

    #[test]
    fn test_already_processed_error() {
        let error = DomainError::already_processed("Request was already resolved");
        assert_eq!(
            error.to_string(),
            "Already processed: Request was already resolved"
        );
    }

    #[test]
    fn test_user_already_in_team_error() {
        let error = DomainError::user_already_in_team("User 'user-1' belongs to a team");
        assert_eq!(
            error.to_string(),
            "User already in a team: User 'user-1' belongs to a team"
        );
    }
}
