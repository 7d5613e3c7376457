//! Configuration for speech synthesis

use serde::{Deserialize, Serialize};

use crate::retry::BackoffPolicy;

/// Path of the synthesis endpoint below `base_url`
pub const SYNTHESIS_PATH: &str = "/text-to-speech/v2";

/// Configuration for the TartuNLP text-to-speech service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Service base URL, without the endpoint path
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Speaker used when the caller does not choose one
    #[serde(default = "default_speaker")]
    pub default_speaker: String,

    /// Speech speed multiplier (0.5 to 2.0)
    #[serde(default = "default_speed")]
    pub speed: f32,

    /// Per-attempt request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Total attempts including the first one
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Backoff base interval in milliseconds
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

fn default_base_url() -> String {
    "https://api.tartunlp.ai".to_string()
}

fn default_speaker() -> String {
    "mari".to_string()
}

const fn default_speed() -> f32 {
    1.0
}

const fn default_timeout_ms() -> u64 {
    30_000
}

const fn default_max_attempts() -> u32 {
    5
}

const fn default_base_delay_ms() -> u64 {
    500
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_speaker: default_speaker(),
            speed: default_speed(),
            timeout_ms: default_timeout_ms(),
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

impl SpeechConfig {
    /// Full synthesis URL
    pub fn endpoint(&self) -> String {
        format!("{}{SYNTHESIS_PATH}", self.base_url.trim_end_matches('/'))
    }

    /// Retry policy derived from this configuration
    pub const fn backoff(&self) -> BackoffPolicy {
        BackoffPolicy::new(self.max_attempts, self.base_delay_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(format!(
                "Base URL must start with http:// or https://, got '{}'",
                self.base_url
            ));
        }

        if self.default_speaker.trim().is_empty() {
            return Err("Default speaker must not be empty".to_string());
        }

        if !(0.5..=2.0).contains(&self.speed) {
            return Err(format!(
                "Speed must be between 0.5 and 2.0, got {}",
                self.speed
            ));
        }

        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if self.max_attempts == 0 {
            return Err("Max attempts must be at least 1".to_string());
        }

        Ok(())
    }
}
