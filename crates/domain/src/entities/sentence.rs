//! Sentence built by tapping tiles

use serde::{Deserialize, Serialize};

use crate::{errors::DomainError, value_objects::TileId};

/// Separator placed between words when a sentence is spoken
pub const SPOKEN_WORD_SEPARATOR: &str = ", ";

/// One tile as it appears in a sentence strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceTile {
    /// Source tile, absent for ad-hoc words
    pub tile_id: Option<TileId>,
    /// Word as written on the tile
    pub word: String,
    pub image_url: Option<String>,
    /// Inflected form after normalization
    pub conjugated_word: Option<String>,
}

impl SentenceTile {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            tile_id: None,
            word: word.into(),
            image_url: None,
            conjugated_word: None,
        }
    }
}

/// An ordered sentence strip
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub tiles: Vec<SentenceTile>,
}

impl Sentence {
    pub const fn new(tiles: Vec<SentenceTile>) -> Self {
        Self { tiles }
    }

    /// Raw words in tile order
    pub fn words(&self) -> Vec<String> {
        self.tiles.iter().map(|t| t.word.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Store normalized words positionally, word `i` onto tile `i`
    ///
    /// Fails without touching any tile when the counts differ.
    pub fn apply_conjugations(&mut self, normalized: &[String]) -> Result<(), DomainError> {
        if normalized.len() != self.tiles.len() {
            return Err(DomainError::ValidationError(format!(
                "expected {} normalized words, got {}",
                self.tiles.len(),
                normalized.len()
            )));
        }
        for (tile, word) in self.tiles.iter_mut().zip(normalized) {
            tile.conjugated_word = Some(word.clone());
        }
        Ok(())
    }

    /// Conjugated words, falling back to the raw word for tiles without one
    pub fn spoken_words(&self) -> Vec<String> {
        self.tiles
            .iter()
            .map(|t| t.conjugated_word.clone().unwrap_or_else(|| t.word.clone()))
            .collect()
    }
}

/// Join words into the text handed to speech synthesis
pub fn speech_text<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(SPOKEN_WORD_SEPARATOR)
}
