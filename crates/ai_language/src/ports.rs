//! Port definitions for sentence normalization

use async_trait::async_trait;

use crate::error::NormalizationError;

/// Turns a sequence of base-form words into grammatically agreeing forms
///
/// The result has exactly one entry per input word, in input order.
#[async_trait]
pub trait Normalizer: Send + Sync {
    /// Normalize the words of one sentence
    async fn normalize(&self, words: &[String]) -> Result<Vec<String>, NormalizationError>;
}
