//! Port definitions for speech synthesis

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::SpeechError;

/// Port for Text-to-Speech (TTS) implementations
///
/// Implementations are shared between concurrent requests and keep no
/// per-call state outside the call itself.
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesize `text` with the given speaker and speed
    ///
    /// Returns the raw audio body (WAV).
    async fn synthesize(
        &self,
        text: &str,
        speaker: &str,
        speed: f32,
    ) -> Result<Bytes, SpeechError>;

    /// Speaker used when callers have no preference
    fn default_speaker(&self) -> &str;
}
