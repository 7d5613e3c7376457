//! Normalizer implementations

pub mod subprocess;

pub use subprocess::SubprocessNormalizer;
