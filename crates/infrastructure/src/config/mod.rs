//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `security`: token signing
//!
//! Speech and normalizer sections reuse the config types of the crates that
//! consume them.

mod security;
mod server;

use std::{fmt, path::Path};

use ai_language::NormalizerConfig;
use ai_speech::SpeechConfig;
use serde::{Deserialize, Serialize};

pub use security::{MAX_TOKEN_VALIDITY_HOURS, MIN_JWT_SECRET_BYTES, SecurityConfig};
pub use server::{LogFormat, ServerConfig};

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "TALKBOARD";

/// Application environment (development or production)
///
/// Controls how much error detail reaches API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - internal error details are exposed
    #[default]
    Development,
    /// Production environment - clients only see generic messages
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Option<Environment>,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Security configuration
    #[serde(default)]
    pub security: SecurityConfig,

    /// Text-to-speech service
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Sentence normalizer subprocess
    #[serde(default)]
    pub normalizer: NormalizerConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (optional) and environment
    ///
    /// Environment variables override the file, e.g.
    /// `TALKBOARD_SERVER__PORT=9000` or `TALKBOARD_SECURITY__JWT_SECRET=...`.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name("config").required(false))
    }

    /// Load configuration from an explicit file, then the environment
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder().add_source(file).add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("server.allowed_origins")
                .with_list_parse_key("normalizer.args"),
        );

        builder.build()?.try_deserialize()
    }

    /// Effective environment
    pub fn environment(&self) -> Environment {
        self.environment.unwrap_or_default()
    }

    /// Whether API errors may carry internal details
    pub fn expose_internal_errors(&self) -> bool {
        self.environment() == Environment::Development
    }

    /// Validate every section, naming the first one that fails
    pub fn validate(&self) -> Result<(), String> {
        self.server
            .validate()
            .map_err(|e| format!("server: {e}"))?;
        self.security
            .validate()
            .map_err(|e| format!("security: {e}"))?;
        self.speech
            .validate()
            .map_err(|e| format!("speech: {e}"))?;
        self.normalizer
            .validate()
            .map_err(|e| format!("normalizer: {e}"))?;
        Ok(())
    }
}
