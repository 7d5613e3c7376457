//! Registered user (the parent or therapist who owns child profiles)

use chrono::{DateTime, Utc};

use super::require_text;
use crate::{
    errors::DomainError,
    value_objects::{EmailAddress, UserId},
};

/// Longest accepted username
pub const MAX_USERNAME_LEN: usize = 50;

/// A registered account
///
/// The password hash is an opaque PHC string produced by the hashing
/// collaborator; the domain never inspects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: Option<UserId>,
    username: String,
    email: EmailAddress,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl User {
    /// Create a not-yet-persisted user
    pub fn new(
        username: impl Into<String>,
        email: EmailAddress,
        password_hash: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let username = require_text("username", username.into())?;
        if username.chars().count() > MAX_USERNAME_LEN {
            return Err(DomainError::ValidationError(format!(
                "username must be at most {MAX_USERNAME_LEN} characters"
            )));
        }
        Ok(Self {
            id: None,
            username,
            email,
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        })
    }

    /// Restore a user from storage
    #[must_use]
    pub const fn restore(
        id: UserId,
        username: String,
        email: EmailAddress,
        password_hash: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            username,
            email,
            password_hash,
            created_at,
        }
    }

    /// Attach the store-assigned identifier
    #[must_use]
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    /// Store-assigned identifier, `None` until saved
    pub const fn id(&self) -> Option<UserId> {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
