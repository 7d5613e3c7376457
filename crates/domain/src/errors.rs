//! Errors raised by entity constructors and stores

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// The address did not pass the email check
    #[error("Invalid email address: {0}")]
    InvalidEmailAddress(String),

    /// No user, profile, category or tile with this id
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// A field broke an entity rule such as a blank name
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    pub fn not_found(entity_type: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Whether the error means a missing record rather than bad input
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
