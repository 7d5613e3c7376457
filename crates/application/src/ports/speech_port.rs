//! Outbound port to the text-to-speech engine

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Speaker and tempo used for every synthesized sentence
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceConfig {
    /// Speaker identifier understood by the synthesis backend
    pub speaker: String,
    /// Speech speed multiplier (1.0 is normal)
    pub speed: f32,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            speaker: "mari".to_string(),
            speed: 1.0,
        }
    }
}

/// Port for speech synthesis
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechPort: Send + Sync {
    /// Synthesize `text` and return the raw audio bytes (WAV)
    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceConfig,
    ) -> Result<Vec<u8>, ApplicationError>;
}
