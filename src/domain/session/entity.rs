//! Session entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::user::UserId;

/// Opaque session token. Carries no claims; the session record is the
/// source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl StorageKey for SessionToken {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// A server-side session record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The opaque token handed to the client
    #[serde(skip_serializing)]
    token: SessionToken,
    user_id: UserId,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: SessionToken, user_id: UserId, expires_at: DateTime<Utc>) -> Self {
        Self {
            token,
            user_id,
            expires_at,
            created_at: Utc::now(),
        }
    }

    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

impl StorageEntity for Session {
    type Key = SessionToken;

    fn key(&self) -> &Self::Key {
        &self.token
    }
}
