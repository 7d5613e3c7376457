//! Stateless bearer tokens (compact JWS, HS256)
//!
//! A token is `base64url(header).base64url(claims).base64url(signature)`
//! with header `{"alg":"HS256","typ":"JWT"}` and claims `{sub, iat, exp}`.
//! No server-side session state exists; the signing key is the only thing
//! shared between requests.

use application::{
    error::ApplicationError,
    ports::{TokenError, TokenPort},
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::{debug, instrument};

use crate::config::{MAX_TOKEN_VALIDITY_HOURS, MIN_JWT_SECRET_BYTES, SecurityConfig};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";
const HEADER_JSON: &str = r#"{"alg":"HS256","typ":"JWT"}"#;
const SIGNATURE_LEN: usize = 32;

#[derive(Debug, Deserialize)]
struct Header {
    alg: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// HS256 token issuer and verifier
#[derive(Clone)]
pub struct TokenCodec {
    /// MAC keyed once at construction, cloned per token
    mac: HmacSha256,
    validity: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("key", &"[REDACTED]")
            .field("validity", &self.validity)
            .finish()
    }
}

impl TokenCodec {
    /// Create a codec from raw key material
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the secret is shorter
    /// than 32 bytes or the validity window is not between one hour and
    /// a year.
    pub fn new(secret: &[u8], validity: Duration) -> Result<Self, ApplicationError> {
        if secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(ApplicationError::Configuration(format!(
                "JWT secret must be at least {MIN_JWT_SECRET_BYTES} bytes"
            )));
        }
        if validity <= Duration::zero()
            || validity > Duration::hours(i64::from(MAX_TOKEN_VALIDITY_HOURS))
        {
            return Err(ApplicationError::Configuration(format!(
                "Token validity must be positive and at most {MAX_TOKEN_VALIDITY_HOURS} hours"
            )));
        }

        let mac = HmacSha256::new_from_slice(secret)
            .map_err(|e| ApplicationError::Configuration(format!("Invalid JWT secret: {e}")))?;

        Ok(Self { mac, validity })
    }

    /// Create a codec from the security section
    pub fn from_config(config: &SecurityConfig) -> Result<Self, ApplicationError> {
        let secret = config.jwt_secret_str().ok_or_else(|| {
            ApplicationError::Configuration("JWT secret is not configured".to_string())
        })?;
        Self::new(
            secret.as_bytes(),
            Duration::hours(i64::from(config.token_validity_hours)),
        )
    }

    pub const fn validity(&self) -> Duration {
        self.validity
    }

    fn sign(&self, signing_input: &str) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(signing_input.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }

    /// Issue a token as of `now`
    pub fn issue_at(&self, identity: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let expires = now
            .checked_add_signed(self.validity)
            .ok_or_else(|| TokenError::Encoding("expiry is out of range".to_string()))?;
        let claims = Claims {
            sub: identity.to_string(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };
        let claims_json =
            serde_json::to_vec(&claims).map_err(|e| TokenError::Encoding(e.to_string()))?;

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(HEADER_JSON),
            URL_SAFE_NO_PAD.encode(claims_json)
        );
        let signature = URL_SAFE_NO_PAD.encode(self.sign(&signing_input));

        Ok(format!("{signing_input}.{signature}"))
    }

    /// Verify a token as of `now` and return its subject
    ///
    /// The signature is checked before the claims are decoded.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let mut segments = token.split('.');
        let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenError::Malformed("expected three segments".to_string()));
        };

        let header: Header = decode_json(header_b64, "header")?;
        if header.alg != ALGORITHM {
            return Err(TokenError::Malformed(format!(
                "unsupported algorithm '{}'",
                header.alg
            )));
        }

        let signature = decode_segment(signature_b64, "signature")?;
        if signature.len() != SIGNATURE_LEN {
            return Err(TokenError::Malformed(format!(
                "signature must be {SIGNATURE_LEN} bytes"
            )));
        }

        let signing_input_len = header_b64.len() + 1 + claims_b64.len();
        let mut mac = self.mac.clone();
        mac.update(&token.as_bytes()[..signing_input_len]);
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::BadSignature)?;

        let claims: Claims = decode_json(claims_b64, "claims")?;
        if claims.exp <= now.timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(claims.sub)
    }
}

fn decode_segment(segment: &str, part: &str) -> Result<Vec<u8>, TokenError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| TokenError::Malformed(format!("{part} is not base64url: {e}")))
}

fn decode_json<T>(segment: &str, part: &str) -> Result<T, TokenError>
where
    T: serde::de::DeserializeOwned,
{
    let bytes = decode_segment(segment, part)?;
    serde_json::from_slice(&bytes)
        .map_err(|e| TokenError::Malformed(format!("{part} is not valid JSON: {e}")))
}

impl TokenPort for TokenCodec {
    #[instrument(skip(self))]
    fn issue(&self, identity: &str) -> Result<String, TokenError> {
        let token = self.issue_at(identity, Utc::now())?;
        debug!("Token issued");
        Ok(token)
    }

    #[instrument(skip(self, token))]
    fn verify(&self, token: &str) -> Result<String, TokenError> {
        self.verify_at(token, Utc::now())
    }
}
