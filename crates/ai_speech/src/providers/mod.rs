//! Speech synthesis provider implementations

pub mod tartunlp;

pub use tartunlp::TartuSpeechClient;
