//! Password hashing with Argon2id
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=19456,t=2,p=1$...`) carrying
//! their own salt and parameters. Hashing is CPU-bound, so both operations
//! run on the blocking pool.

use application::{error::ApplicationError, ports::PasswordHasherPort};
use argon2::{
    Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier as _,
    password_hash::{SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors that can occur during password hashing
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Failed to hash the password
    #[error("Failed to hash password: {0}")]
    HashingFailed(String),

    /// Stored hash is not a valid PHC string
    #[error("Invalid hash format: {0}")]
    InvalidHashFormat(String),
}

impl From<PasswordHashError> for ApplicationError {
    fn from(err: PasswordHashError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Argon2id password hasher with the library's default parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Hash a password with a fresh random salt
    pub fn hash_sync(password: &str) -> Result<String, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))
    }

    /// Check a password against a stored PHC hash
    pub fn verify_sync(password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| PasswordHashError::InvalidHashFormat(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Check if a string looks like an Argon2 PHC hash
    #[must_use]
    pub fn is_hashed(value: &str) -> bool {
        value.starts_with("$argon2")
    }
}

async fn blocking<T, F>(f: F) -> Result<T, ApplicationError>
where
    F: FnOnce() -> Result<T, PasswordHashError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApplicationError::Internal(format!("Hashing task failed: {e}")))?
        .map_err(Into::into)
}

#[async_trait]
impl PasswordHasherPort for Argon2PasswordHasher {
    #[instrument(skip(self, password))]
    async fn hash(&self, password: &str) -> Result<String, ApplicationError> {
        let password = password.to_owned();
        let hash = blocking(move || Self::hash_sync(&password)).await?;
        debug!("Password hashed");
        Ok(hash)
    }

    #[instrument(skip(self, password, hash))]
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, ApplicationError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let matches = blocking(move || Self::verify_sync(&password, &hash)).await?;
        debug!(matches, "Password checked");
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_produces_argon2id_phc_string() {
        let hash = Argon2PasswordHasher::hash_sync("salasõna").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(Argon2PasswordHasher::is_hashed(&hash));
        assert!(!Argon2PasswordHasher::is_hashed("salasõna"));
    }

    #[test]
    fn same_password_gets_different_salts() {
        let a = Argon2PasswordHasher::hash_sync("secret1").unwrap();
        let b = Argon2PasswordHasher::hash_sync("secret1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn verify_sync_rejects_garbage_hash() {
        assert!(matches!(
            Argon2PasswordHasher::verify_sync("x", "plaintext"),
            Err(PasswordHashError::InvalidHashFormat(_))
        ));
    }

    #[test]
    fn login_placeholder_hash_parses_and_never_matches() {
        let hash = application::DUMMY_PASSWORD_HASH;
        assert!(!Argon2PasswordHasher::verify_sync("", hash).unwrap());
        assert!(!Argon2PasswordHasher::verify_sync("secret1", hash).unwrap());
    }

    #[tokio::test]
    async fn port_round_trip() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("secret1").await.unwrap();

        assert!(hasher.verify("secret1", &hash).await.unwrap());
        assert!(!hasher.verify("secret2", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn port_maps_bad_hash_to_internal_error() {
        let err = Argon2PasswordHasher::new()
            .verify("secret1", "not-a-hash")
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Internal(_)));
    }
}
