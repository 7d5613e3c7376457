//! Speech adapter - Implements SpeechPort using the ai_speech crate

use std::sync::Arc;

use ai_speech::{SpeechConfig, SpeechError, TartuSpeechClient, TextToSpeech};
use application::{
    error::ApplicationError,
    ports::{SpeechPort, VoiceConfig},
};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

/// Adapter for speech synthesis using the TartuNLP client
pub struct SpeechAdapter {
    provider: Arc<dyn TextToSpeech>,
}

impl std::fmt::Debug for SpeechAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechAdapter")
            .field("default_speaker", &self.provider.default_speaker())
            .finish_non_exhaustive()
    }
}

impl SpeechAdapter {
    /// Create a new speech adapter
    ///
    /// # Errors
    ///
    /// Returns an error if the client fails to initialize.
    pub fn new(config: SpeechConfig) -> Result<Self, ApplicationError> {
        let provider = TartuSpeechClient::new(config).map_err(Self::map_error)?;
        Ok(Self::with_provider(Arc::new(provider)))
    }

    /// Wrap an existing provider
    pub fn with_provider(provider: Arc<dyn TextToSpeech>) -> Self {
        Self { provider }
    }

    /// Map speech error to application error
    ///
    /// Exhausted retries become `SpeechUnavailable`; a rejected request is
    /// an external service error. Both keep the details for logging only.
    fn map_error(err: SpeechError) -> ApplicationError {
        match err {
            SpeechError::ServiceUnavailable { .. } => {
                ApplicationError::SpeechUnavailable(err.to_string())
            },
            SpeechError::TransportFailure(ref cause) => {
                warn!(error = %err, cause = ?cause, "Speech transport failed");
                ApplicationError::SpeechUnavailable(error_chain(&err))
            },
            SpeechError::ClientRequestRejected { .. } => {
                ApplicationError::ExternalService(err.to_string())
            },
            SpeechError::InvalidInput(e) => {
                ApplicationError::Domain(domain::DomainError::ValidationError(e))
            },
            SpeechError::Configuration(e) => ApplicationError::Configuration(e),
        }
    }
}

/// Error message followed by every source, joined with `: `
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[async_trait]
impl SpeechPort for SpeechAdapter {
    #[instrument(skip(self, text), fields(text_len = text.len(), speaker = %voice.speaker))]
    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceConfig,
    ) -> Result<Vec<u8>, ApplicationError> {
        let audio = self
            .provider
            .synthesize(text, &voice.speaker, voice.speed)
            .await
            .map_err(Self::map_error)?;

        debug!(audio_bytes = audio.len(), "Synthesis complete");
        Ok(audio.to_vec())
    }
}
