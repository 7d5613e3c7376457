//! Speech synthesis errors

use thiserror::Error;

use crate::retry::Retryable;

/// Longest response body excerpt kept for diagnostics
pub const MAX_BODY_EXCERPT_CHARS: usize = 100;

/// Errors that can occur during speech synthesis
#[derive(Debug, Error)]
pub enum SpeechError {
    /// 429 or 5xx from the synthesis service
    #[error("Speech service unavailable (HTTP {status})")]
    ServiceUnavailable { status: u16 },

    /// Any other non-success status; never retried
    #[error("Speech request rejected (HTTP {status}): {body}")]
    ClientRequestRejected { status: u16, body: String },

    /// Connection refused, reset, timeout or unreadable body
    #[error("Transport failure: {0}")]
    TransportFailure(#[from] reqwest::Error),

    /// Input rejected before any request was made
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl SpeechError {
    /// Build a rejection, keeping only the start of the body
    pub fn rejected(status: u16, body: &str) -> Self {
        Self::ClientRequestRejected {
            status,
            body: body.chars().take(MAX_BODY_EXCERPT_CHARS).collect(),
        }
    }
}

impl Retryable for SpeechError {
    fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ServiceUnavailable { .. } | Self::TransportFailure(_)
        )
    }
}
