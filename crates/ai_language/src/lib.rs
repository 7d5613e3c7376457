//! AI Language - Sentence normalization for Talkboard
//!
//! Inflects the words of a sentence (e.g. "Ma tahan" + "mängima" becomes
//! "Ma tahan" + "mängida") by running an external language tool.
//!
//! # Architecture
//!
//! - `ports` defines the `Normalizer` trait
//! - `providers` holds the subprocess implementation
//! - `literal` owns the textual list format exchanged with the tool, so the
//!   fragile parsing lives in exactly one place
//!
//! # Example
//!
//! ```ignore
//! use ai_language::{Normalizer, NormalizerConfig, SubprocessNormalizer};
//!
//! let normalizer = SubprocessNormalizer::new(NormalizerConfig::default())?;
//! let words = normalizer.normalize(&["tulema".into(), "mina".into()]).await?;
//! ```

pub mod config;
pub mod error;
pub mod literal;
pub mod ports;
pub mod providers;

pub use config::NormalizerConfig;
pub use error::NormalizationError;
pub use ports::Normalizer;
pub use providers::SubprocessNormalizer;
