//! AI Speech - Text-to-speech client for Talkboard
//!
//! Provides the `TextToSpeech` port and a TartuNLP implementation that
//! retries transient failures with exponential backoff and jitter.
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the trait (port)
//! - `providers` module contains the concrete implementation (adapter)
//! - `retry` holds the backoff policy and the generic retry combinator
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{SpeechConfig, TartuSpeechClient, TextToSpeech};
//!
//! let client = TartuSpeechClient::new(SpeechConfig::default())?;
//! let wav = client.synthesize("Tere", "mari", 1.0).await?;
//! ```

pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod retry;
pub mod types;

pub use config::SpeechConfig;
pub use error::SpeechError;
pub use ports::TextToSpeech;
pub use providers::TartuSpeechClient;
pub use retry::{BackoffPolicy, RetryResult, Retryable, with_retry, with_retry_using};
