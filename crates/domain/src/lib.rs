//! Domain layer for Talkboard
//!
//! Contains the communication-board entities (users, child profiles,
//! categories, word tiles, sentences), their identifiers and domain errors.
//! This layer has no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
