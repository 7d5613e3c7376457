//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod board_store;
mod normalization_port;
mod password_hasher_port;
mod speech_port;
mod token_port;
mod user_store;

#[cfg(test)]
pub use board_store::{MockCategoryStore, MockProfileStore, MockTileStore};
pub use board_store::{CategoryStore, ProfileStore, TileStore};
#[cfg(test)]
pub use normalization_port::MockNormalizationPort;
pub use normalization_port::NormalizationPort;
#[cfg(test)]
pub use password_hasher_port::MockPasswordHasherPort;
pub use password_hasher_port::PasswordHasherPort;
#[cfg(test)]
pub use speech_port::MockSpeechPort;
pub use speech_port::{SpeechPort, VoiceConfig};
#[cfg(test)]
pub use token_port::MockTokenPort;
pub use token_port::{TokenError, TokenPort};
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::UserStore;
