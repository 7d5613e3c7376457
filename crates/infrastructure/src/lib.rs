//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: token signing,
//! password hashing, speech synthesis, sentence normalization and storage.
//! Also owns application configuration loading.

pub mod adapters;
pub mod config;
pub mod persistence;

pub use adapters::*;
pub use config::{AppConfig, Environment, LogFormat, SecurityConfig, ServerConfig};
pub use persistence::{
    InMemoryCategoryStore, InMemoryProfileStore, InMemoryTileStore, InMemoryUserStore,
};
