//! Password hashing port

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for one-way, salted password hashing
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PasswordHasherPort: Send + Sync {
    /// Hash a plaintext password into a self-describing hash string
    async fn hash(&self, password: &str) -> Result<String, ApplicationError>;

    /// Check a plaintext password against a stored hash
    ///
    /// Returns `Ok(false)` for a mismatch; errors are reserved for hashes
    /// that cannot be parsed or a failing hashing backend.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, ApplicationError>;
}
