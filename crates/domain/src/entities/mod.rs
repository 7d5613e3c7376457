//! Domain entities - Objects with identity and lifecycle

mod board;
mod sentence;
mod user;

pub use board::{Category, ChildProfile, Tile};
pub use sentence::{SPOKEN_WORD_SEPARATOR, Sentence, SentenceTile, speech_text};
pub use user::{MAX_USERNAME_LEN, User};

use crate::errors::DomainError;

/// Trim a required text field, rejecting blank values
fn require_text(field: &str, value: String) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::ValidationError(format!(
            "{field} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}
