//! Sentence handlers
//!
//! Conjugation, conjugation with speech, and speech of a prepared word
//! list. Audio travels back as standard base64 of the WAV bytes.

use axum::{Json, extract::State};
use base64::{Engine, engine::general_purpose::STANDARD};
use domain::{Sentence, SentenceTile, TileId};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// One tile of a sentence strip as sent by the board
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SentenceTileDto {
    #[serde(default)]
    pub id: Option<i64>,
    pub word: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conjugated_word: Option<String>,
}

impl From<SentenceTileDto> for SentenceTile {
    fn from(dto: SentenceTileDto) -> Self {
        Self {
            tile_id: dto.id.map(TileId::new),
            word: dto.word,
            image_url: dto.image_url,
            conjugated_word: dto.conjugated_word,
        }
    }
}

impl From<SentenceTile> for SentenceTileDto {
    fn from(tile: SentenceTile) -> Self {
        Self {
            id: tile.tile_id.map(TileId::value),
            word: tile.word,
            image_url: tile.image_url,
            conjugated_word: tile.conjugated_word,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SentenceRequest {
    #[validate(length(min = 1, message = "must contain at least one tile"))]
    pub sentence: Vec<SentenceTileDto>,
}

impl SentenceRequest {
    fn into_sentence(self) -> Sentence {
        Sentence::new(self.sentence.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct AudioRequest {
    #[validate(length(min = 1, message = "must contain at least one word"))]
    pub sentence: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    pub sentence: Vec<SentenceTileDto>,
    pub audio_base64: String,
}

fn tiles_of(sentence: Sentence) -> Vec<SentenceTileDto> {
    sentence.tiles.into_iter().map(Into::into).collect()
}

/// POST /api/text/conjugate
#[instrument(skip(state, request), fields(tiles = request.sentence.len()))]
pub async fn conjugate(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SentenceRequest>,
) -> Result<Json<Vec<SentenceTileDto>>, ApiError> {
    let sentence = state
        .sentence_service
        .conjugate(request.into_sentence())
        .await?;
    Ok(Json(tiles_of(sentence)))
}

/// POST /api/text/process
#[instrument(skip(state, request), fields(tiles = request.sentence.len()))]
pub async fn process(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SentenceRequest>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let processed = state
        .sentence_service
        .process(request.into_sentence())
        .await?;
    Ok(Json(ProcessResponse {
        sentence: tiles_of(processed.sentence),
        audio_base64: STANDARD.encode(&processed.audio),
    }))
}

/// POST /api/text/audio
///
/// Speaks the words exactly as given; no normalization. The body is the
/// bare base64 text, not a JSON string.
#[instrument(skip(state, request), fields(words = request.sentence.len()))]
pub async fn audio(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AudioRequest>,
) -> Result<String, ApiError> {
    let audio = state.sentence_service.speak(&request.sentence).await?;
    Ok(STANDARD.encode(&audio))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_dto_reads_board_json() {
        let dto: SentenceTileDto = serde_json::from_value(serde_json::json!({
            "id": 5,
            "word": "mängima",
            "imageUrl": "/api/images/m.png"
        }))
        .unwrap();

        let tile = SentenceTile::from(dto);

        assert_eq!(tile.tile_id, Some(TileId::new(5)));
        assert_eq!(tile.word, "mängima");
        assert!(tile.conjugated_word.is_none());
    }

    #[test]
    fn conjugated_word_is_written_back() {
        let mut tile = SentenceTile::new("mängima");
        tile.conjugated_word = Some("mängida".into());

        let json = serde_json::to_value(SentenceTileDto::from(tile)).unwrap();

        assert_eq!(json["conjugatedWord"], "mängida");
        assert_eq!(json["id"], serde_json::Value::Null);
    }

    #[test]
    fn empty_sentence_fails_validation() {
        let request = SentenceRequest { sentence: vec![] };
        assert!(request.validate().is_err());
        let request = AudioRequest { sentence: vec![] };
        assert!(request.validate().is_err());
    }
}
