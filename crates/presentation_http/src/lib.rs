//! Talkboard HTTP presentation layer
//!
//! Axum routes for accounts, boards and the sentence pipeline, plus the
//! request ID, authentication gate and route policy middleware.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, set_expose_internal_errors};
pub use middleware::{
    AuthenticationGateLayer, RequestIdLayer, RoutePolicyLayer, ValidatedJson, ValidationError,
};
pub use routes::create_router;
pub use state::AppState;
