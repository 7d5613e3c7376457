//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Credentials did not match
    #[error("Invalid username or password")]
    AuthenticationFailed,

    /// User not authorized
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// Entity already exists (e.g. taken username)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Language normalization tool exited unsuccessfully or could not run
    #[error("Normalization failed: {0}")]
    NormalizationFailed(String),

    /// Language normalization tool answered with the wrong number of words
    #[error("Normalization returned {actual} words for {expected} inputs")]
    NormalizationContractViolation { expected: usize, actual: usize },

    /// Speech synthesis backend unavailable after retries
    #[error("Speech synthesis unavailable: {0}")]
    SpeechUnavailable(String),

    /// External service rejected the request
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::SpeechUnavailable(_))
    }

    /// Shorthand for a missing entity
    pub fn not_found(entity_type: &str, id: impl ToString) -> Self {
        Self::Domain(DomainError::not_found(entity_type, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_failure_message_is_generic() {
        let msg = ApplicationError::AuthenticationFailed.to_string();
        assert_eq!(msg, "Invalid username or password");
    }

    #[test]
    fn contract_violation_reports_counts() {
        let err = ApplicationError::NormalizationContractViolation {
            expected: 2,
            actual: 3,
        };
        assert_eq!(err.to_string(), "Normalization returned 3 words for 2 inputs");
    }

    #[test]
    fn only_unavailable_speech_is_retryable() {
        assert!(ApplicationError::SpeechUnavailable("503".into()).is_retryable());
        assert!(!ApplicationError::ExternalService("404".into()).is_retryable());
        assert!(!ApplicationError::AuthenticationFailed.is_retryable());
    }

    #[test]
    fn not_found_wraps_domain_error() {
        let err = ApplicationError::not_found("Tile", 4);
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::NotFound { .. })
        ));
        assert_eq!(err.to_string(), "Tile not found: 4");
    }
}
