//! Language normalization port
//!
//! Inflects an ordered word list for one sentence. The adapter behind it may
//! be a subprocess, an RPC client or anything else; callers only rely on the
//! positional contract: output word `i` is the normalized form of input
//! word `i`, and both lists have the same length.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for sentence normalization
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NormalizationPort: Send + Sync {
    /// Normalize `words`, preserving count and order
    ///
    /// Fails with `NormalizationFailed` when the backend errors and with
    /// `NormalizationContractViolation` when it returns a different count.
    async fn normalize(&self, words: &[String]) -> Result<Vec<String>, ApplicationError>;
}
