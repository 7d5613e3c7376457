//! Per-request authentication context
//!
//! The HTTP gate creates exactly one `AuthenticationContext` per inbound
//! request and stores it in that request's extensions. It is either
//! anonymous or carries the identity resolved from a valid bearer token.
//! Nothing here is shared between requests.
//!
//! ```
//! use application::AuthenticationContext;
//! use uuid::Uuid;
//!
//! let anon = AuthenticationContext::anonymous(Uuid::now_v7());
//! assert!(!anon.is_authenticated());
//!
//! let ctx = AuthenticationContext::authenticated("mari", Uuid::now_v7());
//! assert_eq!(ctx.identity(), Some("mari"));
//! ```

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Resolved principal (or its absence) for one in-flight request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationContext {
    identity: Option<String>,
    request_id: Uuid,
    received_at: DateTime<Utc>,
}

impl AuthenticationContext {
    /// Context for a request without a usable credential
    #[must_use]
    pub fn anonymous(request_id: Uuid) -> Self {
        Self {
            identity: None,
            request_id,
            received_at: Utc::now(),
        }
    }

    /// Context for a request whose token resolved to `identity`
    #[must_use]
    pub fn authenticated(identity: impl Into<String>, request_id: Uuid) -> Self {
        Self {
            identity: Some(identity.into()),
            request_id,
            received_at: Utc::now(),
        }
    }

    /// Token subject, `None` when anonymous
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub const fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub const fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// When the gate saw the request
    pub const fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }
}
