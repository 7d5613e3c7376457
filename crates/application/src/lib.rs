//! Application layer - Use cases and orchestration
//!
//! Contains the authentication use cases, board management and the sentence
//! pipeline, plus the port definitions infrastructure adapters implement.

pub mod auth_context;
pub mod error;
pub mod ports;
pub mod services;

pub use auth_context::AuthenticationContext;
pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
