//! Application services

mod auth_service;
mod catalog_service;
mod sentence_service;

pub use auth_service::{
    AuthService, AuthenticatedSession, DUMMY_PASSWORD_HASH, MIN_PASSWORD_LEN, NewAccount,
};
pub use catalog_service::{CatalogService, CategoryBoard, DEFAULT_PROFILE_NAME, ProfileBoard};
pub use sentence_service::{ProcessedSentence, SentenceService};
