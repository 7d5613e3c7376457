//! Token port - Interface for issuing and verifying bearer tokens

#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Why a presented token was not accepted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Token could not be parsed
    #[error("malformed token: {0}")]
    Malformed(String),

    /// Signature check failed
    #[error("token signature mismatch")]
    BadSignature,

    /// Expiry is at or before the current time
    #[error("token expired")]
    Expired,

    /// Claims could not be encoded while issuing
    #[error("token encoding failed: {0}")]
    Encoding(String),
}

/// Port for stateless identity tokens
///
/// Implementations hold only immutable key material, so a single instance
/// serves every request concurrently.
#[cfg_attr(test, automock)]
pub trait TokenPort: Send + Sync {
    /// Issue a signed, expiring token whose subject is `identity`
    fn issue(&self, identity: &str) -> Result<String, TokenError>;

    /// Verify a token and return its subject
    fn verify(&self, token: &str) -> Result<String, TokenError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn TokenPort>();
    }

    #[test]
    fn error_messages_do_not_leak_token_material() {
        assert_eq!(TokenError::BadSignature.to_string(), "token signature mismatch");
        assert_eq!(TokenError::Expired.to_string(), "token expired");
    }
}
