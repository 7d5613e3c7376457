//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod normalizer_adapter;
mod password_hasher;
mod speech_adapter;
mod token_codec;

pub use normalizer_adapter::NormalizerAdapter;
pub use password_hasher::{Argon2PasswordHasher, PasswordHashError};
pub use speech_adapter::SpeechAdapter;
pub use token_codec::TokenCodec;
