//! TartuNLP text-to-speech provider
//!
//! Posts `{text, speaker, speed}` as JSON and receives WAV bytes. Each call
//! runs under the configured [`BackoffPolicy`]:
//!
//! | Response                  | Outcome                                  |
//! |---------------------------|------------------------------------------|
//! | 2xx                       | body bytes                               |
//! | 429, 5xx                  | retry; `ServiceUnavailable` when spent   |
//! | any other status          | `ClientRequestRejected`, no retry        |
//! | connect/timeout/reset     | retry; `TransportFailure` when spent     |

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, CONTENT_TYPE},
};
use tracing::{debug, instrument, warn};

use crate::{
    config::SpeechConfig,
    error::SpeechError,
    ports::TextToSpeech,
    retry::{BackoffPolicy, with_retry},
    types::SynthesisRequest,
};

/// Media type requested from the service
const AUDIO_WAV: &str = "audio/wav";

/// How one response status is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusClass {
    Success,
    Retryable,
    Terminal,
}

fn classify(status: StatusCode) -> StatusClass {
    if status.is_success() {
        StatusClass::Success
    } else if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        StatusClass::Retryable
    } else {
        StatusClass::Terminal
    }
}

/// Speech client for the TartuNLP API
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct TartuSpeechClient {
    client: Client,
    endpoint: String,
    policy: BackoffPolicy,
    config: SpeechConfig,
}

impl TartuSpeechClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
            policy: config.backoff(),
            config,
        })
    }

    /// Endpoint every request is sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// One request/response exchange, no retry
    async fn attempt(&self, body: &SynthesisRequest<'_>) -> Result<Bytes, SpeechError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, AUDIO_WAV)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        match classify(status) {
            StatusClass::Success => Ok(response.bytes().await?),
            StatusClass::Retryable => Err(SpeechError::ServiceUnavailable {
                status: status.as_u16(),
            }),
            StatusClass::Terminal => {
                let body = response.text().await.unwrap_or_default();
                Err(SpeechError::rejected(status.as_u16(), &body))
            },
        }
    }
}

#[async_trait]
impl TextToSpeech for TartuSpeechClient {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn synthesize(
        &self,
        text: &str,
        speaker: &str,
        speed: f32,
    ) -> Result<Bytes, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::InvalidInput("text must not be empty".to_string()));
        }

        let body = SynthesisRequest {
            text,
            speaker,
            speed,
        };
        let outcome = with_retry(&self.policy, || self.attempt(&body)).await;

        match &outcome.result {
            Ok(audio) => debug!(
                attempts = outcome.attempts,
                audio_bytes = audio.len(),
                "Speech synthesized"
            ),
            Err(e) => warn!(attempts = outcome.attempts, error = %e, "Speech synthesis failed"),
        }
        outcome.into_result()
    }

    fn default_speaker(&self) -> &str {
        &self.config.default_speaker
    }
}
