//! API error handling
//!
//! Maps application errors onto HTTP statuses with a `{error, code, details?}`
//! body. In production mode, failures of the server or its backends return
//! generic messages without details.

use std::sync::atomic::{AtomicBool, Ordering};

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Global flag to control error detail exposure
/// Set to false in production to prevent information leakage
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

/// Configure whether internal error details should be exposed in responses.
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self, expose: bool) -> ErrorResponse {
        let detailed = |msg: &String, generic: &str| {
            if expose {
                msg.clone()
            } else {
                generic.to_string()
            }
        };

        let (code, error, details) = match self {
            Self::BadRequest(msg) => ("bad_request", msg.clone(), None),
            // Never say which part of a credential was wrong
            Self::Unauthorized(msg) => (
                "unauthorized",
                detailed(msg, "Authentication required"),
                None,
            ),
            Self::Forbidden(msg) => ("forbidden", detailed(msg, "Access denied"), None),
            Self::NotFound(msg) => ("not_found", msg.clone(), None),
            Self::Conflict(msg) => ("conflict", msg.clone(), None),
            Self::ServiceUnavailable(msg) => (
                "service_unavailable",
                detailed(msg, "Service temporarily unavailable"),
                None,
            ),
            Self::Internal(msg) => (
                "internal_error",
                "An internal error occurred".to_string(),
                expose.then(|| msg.clone()),
            ),
        };

        ErrorResponse {
            error,
            code: code.to_string(),
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::ServiceUnavailable(msg) => warn!(error = %msg, "Backend unavailable"),
            Self::Internal(msg) => error!(error = %msg, "Request failed"),
            _ => {},
        }

        (self.status(), Json(self.body(should_expose_details()))).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e @ DomainError::NotFound { .. }) => Self::NotFound(e.to_string()),
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::AuthenticationFailed => Self::Unauthorized(err.to_string()),
            ApplicationError::NotAuthorized(msg) => Self::Forbidden(msg),
            ApplicationError::Conflict(msg) => Self::Conflict(msg),
            ApplicationError::NormalizationFailed(_)
            | ApplicationError::SpeechUnavailable(_)
            | ApplicationError::ExternalService(_) => Self::ServiceUnavailable(err.to_string()),
            ApplicationError::NormalizationContractViolation { .. }
            | ApplicationError::Configuration(_)
            | ApplicationError::Internal(_) => Self::Internal(err.to_string()),
        }
    }
}
