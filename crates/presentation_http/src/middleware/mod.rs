//! HTTP middleware components
//!
//! Request correlation, the authentication gate, the route policy and
//! validated JSON extraction.

pub mod auth;
pub mod request_id;
pub mod route_policy;
pub mod validation;

pub use auth::{AuthenticationGate, AuthenticationGateLayer};
pub use request_id::{REQUEST_ID_HEADER, RequestId, RequestIdLayer};
pub use route_policy::{RoutePolicyLayer, requires_authentication};
pub use validation::{ValidatedJson, ValidationError};
