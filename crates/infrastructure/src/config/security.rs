//! Security configuration: token signing.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Smallest accepted HS256 key, in bytes
pub const MIN_JWT_SECRET_BYTES: usize = 32;

/// Longest accepted token lifetime (one year)
pub const MAX_TOKEN_VALIDITY_HOURS: u32 = 24 * 366;

/// Security configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Shared secret for signing bearer tokens (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub jwt_secret: Option<SecretString>,

    /// How long an issued token stays valid
    #[serde(default = "default_token_validity_hours")]
    pub token_validity_hours: u32,
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field(
                "jwt_secret",
                &if self.jwt_secret.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("token_validity_hours", &self.token_validity_hours)
            .finish()
    }
}

const fn default_token_validity_hours() -> u32 {
    10
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_validity_hours: default_token_validity_hours(),
        }
    }
}

impl SecurityConfig {
    /// Get the signing secret as a string reference
    #[must_use]
    pub fn jwt_secret_str(&self) -> Option<&str> {
        self.jwt_secret.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let secret = self
            .jwt_secret_str()
            .ok_or_else(|| "JWT secret is not configured".to_string())?;

        if secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(format!(
                "JWT secret must be at least {MIN_JWT_SECRET_BYTES} bytes, got {}",
                secret.len()
            ));
        }

        if !(1..=MAX_TOKEN_VALIDITY_HOURS).contains(&self.token_validity_hours) {
            return Err(format!(
                "Token validity must be between 1 and {MAX_TOKEN_VALIDITY_HOURS} hours, got {}",
                self.token_validity_hours
            ));
        }

        Ok(())
    }
}
