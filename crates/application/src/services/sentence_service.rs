//! Sentence service - normalization and speech for sentence strips
//!
//! Three flows share the same two ports:
//! 1. conjugate: normalize the tile words and store the forms on the tiles
//! 2. process: conjugate, then speak the normalized words
//! 3. speak: speak an already prepared word list as-is

use std::{fmt, sync::Arc, time::Instant};

use domain::{DomainError, Sentence, speech_text};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{NormalizationPort, SpeechPort, VoiceConfig},
};

/// A conjugated sentence with its audio
#[derive(Debug, Clone)]
pub struct ProcessedSentence {
    /// Normalized text that was spoken
    pub text: String,
    /// Tiles with `conjugated_word` filled in
    pub sentence: Sentence,
    /// Raw WAV bytes
    pub audio: Vec<u8>,
}

/// Service for the sentence pipeline
pub struct SentenceService {
    normalizer: Arc<dyn NormalizationPort>,
    speech: Arc<dyn SpeechPort>,
    voice: VoiceConfig,
}

impl fmt::Debug for SentenceService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentenceService")
            .field("voice", &self.voice)
            .finish_non_exhaustive()
    }
}

impl SentenceService {
    pub fn new(normalizer: Arc<dyn NormalizationPort>, speech: Arc<dyn SpeechPort>) -> Self {
        Self::with_voice(normalizer, speech, VoiceConfig::default())
    }

    pub fn with_voice(
        normalizer: Arc<dyn NormalizationPort>,
        speech: Arc<dyn SpeechPort>,
        voice: VoiceConfig,
    ) -> Self {
        Self {
            normalizer,
            speech,
            voice,
        }
    }

    pub const fn voice(&self) -> &VoiceConfig {
        &self.voice
    }

    /// Normalize the sentence and record each form on its tile
    #[instrument(skip(self, sentence), fields(tiles = sentence.tiles.len()))]
    pub async fn conjugate(&self, mut sentence: Sentence) -> Result<Sentence, ApplicationError> {
        require_words(sentence.is_empty())?;
        let words = sentence.words();
        let normalized = self.normalizer.normalize(&words).await?;
        if normalized.len() != words.len() {
            warn!(
                expected = words.len(),
                actual = normalized.len(),
                "Normalizer broke the positional contract"
            );
            return Err(ApplicationError::NormalizationContractViolation {
                expected: words.len(),
                actual: normalized.len(),
            });
        }
        sentence.apply_conjugations(&normalized)?;
        debug!(?normalized, "Sentence conjugated");
        Ok(sentence)
    }

    /// Conjugate, then synthesize the normalized sentence
    #[instrument(skip(self, sentence), fields(tiles = sentence.tiles.len()))]
    pub async fn process(&self, sentence: Sentence) -> Result<ProcessedSentence, ApplicationError> {
        let start = Instant::now();
        let sentence = self.conjugate(sentence).await?;
        let text = speech_text(&sentence.spoken_words());
        let audio = self.speech.synthesize(&text, &self.voice).await?;

        info!(
            audio_bytes = audio.len(),
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Sentence processed"
        );
        Ok(ProcessedSentence {
            text,
            sentence,
            audio,
        })
    }

    /// Synthesize words exactly as given, joined for speech
    #[instrument(skip(self, words), fields(words = words.len()))]
    pub async fn speak(&self, words: &[String]) -> Result<Vec<u8>, ApplicationError> {
        require_words(words.is_empty())?;
        self.speech.synthesize(&speech_text(words), &self.voice).await
    }
}

fn require_words(empty: bool) -> Result<(), ApplicationError> {
    if empty {
        return Err(DomainError::ValidationError(
            "sentence must contain at least one word".to_string(),
        )
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use domain::SentenceTile;

    use super::*;
    use crate::ports::{MockNormalizationPort, MockSpeechPort};

    fn sentence(words: &[&str]) -> Sentence {
        Sentence::new(words.iter().map(|w| SentenceTile::new(*w)).collect())
    }

    fn service(normalizer: MockNormalizationPort, speech: MockSpeechPort) -> SentenceService {
        SentenceService::new(Arc::new(normalizer), Arc::new(speech))
    }

    #[tokio::test]
    async fn conjugate_fills_forms_in_order() {
        let mut normalizer = MockNormalizationPort::new();
        normalizer
            .expect_normalize()
            .withf(|words| words == ["Ma tahan", "mängima"])
            .returning(|_| Ok(vec!["Ma tahan".into(), "mängida".into()]));

        let out = service(normalizer, MockSpeechPort::new())
            .conjugate(sentence(&["Ma tahan", "mängima"]))
            .await
            .unwrap();

        assert_eq!(out.tiles[0].conjugated_word.as_deref(), Some("Ma tahan"));
        assert_eq!(out.tiles[1].conjugated_word.as_deref(), Some("mängida"));
    }

    #[tokio::test]
    async fn count_mismatch_is_contract_violation() {
        let mut normalizer = MockNormalizationPort::new();
        normalizer
            .expect_normalize()
            .returning(|_| Ok(vec!["üks".into()]));
        let mut speech = MockSpeechPort::new();
        speech.expect_synthesize().never();

        let err = service(normalizer, speech)
            .process(sentence(&["a", "b"]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::NormalizationContractViolation {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[tokio::test]
    async fn normalization_failure_stops_before_speech() {
        let mut normalizer = MockNormalizationPort::new();
        normalizer
            .expect_normalize()
            .returning(|_| Err(ApplicationError::NormalizationFailed("exit 1".into())));
        let mut speech = MockSpeechPort::new();
        speech.expect_synthesize().never();

        let err = service(normalizer, speech)
            .process(sentence(&["tulema"]))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NormalizationFailed(_)));
    }

    #[tokio::test]
    async fn process_speaks_normalized_words_with_default_voice() {
        let mut normalizer = MockNormalizationPort::new();
        normalizer
            .expect_normalize()
            .returning(|_| Ok(vec!["Ma tahan".into(), "süüa".into()]));
        let mut speech = MockSpeechPort::new();
        speech
            .expect_synthesize()
            .withf(|text, voice| text == "Ma tahan, süüa" && voice.speaker == "mari")
            .returning(|_, _| Ok(vec![1, 2, 3]));

        let processed = service(normalizer, speech)
            .process(sentence(&["Ma tahan", "sööma"]))
            .await
            .unwrap();

        assert_eq!(processed.text, "Ma tahan, süüa");
        assert_eq!(processed.audio, vec![1, 2, 3]);
        assert_eq!(processed.sentence.tiles[1].word, "sööma");
    }

    #[tokio::test]
    async fn speak_joins_words_without_normalizing() {
        let mut normalizer = MockNormalizationPort::new();
        normalizer.expect_normalize().never();
        let mut speech = MockSpeechPort::new();
        speech
            .expect_synthesize()
            .withf(|text, _| text == "tere, tulemast")
            .returning(|_, _| Ok(vec![9]));

        let audio = service(normalizer, speech)
            .speak(&["tere".into(), "tulemast".into()])
            .await
            .unwrap();
        assert_eq!(audio, vec![9]);
    }

    #[tokio::test]
    async fn empty_input_is_rejected_without_calling_ports() {
        let mut normalizer = MockNormalizationPort::new();
        normalizer.expect_normalize().never();
        let mut speech = MockSpeechPort::new();
        speech.expect_synthesize().never();
        let svc = service(normalizer, speech);

        assert!(matches!(
            svc.process(Sentence::default()).await,
            Err(ApplicationError::Domain(_))
        ));
        assert!(matches!(svc.speak(&[]).await, Err(ApplicationError::Domain(_))));
    }

    #[tokio::test]
    async fn custom_voice_is_used() {
        let mut speech = MockSpeechPort::new();
        speech
            .expect_synthesize()
            .withf(|_, voice| voice.speaker == "albert" && (voice.speed - 1.2).abs() < 1e-6)
            .returning(|_, _| Ok(vec![]));
        let svc = SentenceService::with_voice(
            Arc::new(MockNormalizationPort::new()),
            Arc::new(speech),
            VoiceConfig {
                speaker: "albert".into(),
                speed: 1.2,
            },
        );

        svc.speak(&["tere".into()]).await.unwrap();
    }
}
