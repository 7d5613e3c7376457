//! Communication board entities
//!
//! A user owns child profiles; a profile groups tiles into ordered
//! categories; a tile is one word (or phrase) with its picture.

use serde::{Deserialize, Serialize};

use super::require_text;
use crate::{
    errors::DomainError,
    value_objects::{CategoryId, ProfileId, TileId, UserId},
};

/// A child profile owned by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildProfile {
    /// Store-assigned identifier, `None` until saved
    pub id: Option<ProfileId>,
    /// Display name
    pub name: String,
    /// Owning user
    pub user_id: UserId,
}

impl ChildProfile {
    /// Create a not-yet-persisted profile
    pub fn new(name: impl Into<String>, user_id: UserId) -> Result<Self, DomainError> {
        Ok(Self {
            id: None,
            name: require_text("profile name", name.into())?,
            user_id,
        })
    }

    /// Change the display name
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        self.name = require_text("profile name", name.into())?;
        Ok(())
    }
}

/// A category of tiles inside a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Option<CategoryId>,
    pub name: String,
    /// Picture shown on the category button
    pub image_url: Option<String>,
    /// Position within the profile (ascending)
    pub order_number: i32,
    pub profile_id: ProfileId,
}

impl Category {
    /// Create a not-yet-persisted category
    pub fn new(
        name: impl Into<String>,
        image_url: Option<String>,
        order_number: i32,
        profile_id: ProfileId,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id: None,
            name: require_text("category name", name.into())?,
            image_url,
            order_number,
            profile_id,
        })
    }

    /// Replace name and picture
    pub fn update(
        &mut self,
        name: impl Into<String>,
        image_url: Option<String>,
    ) -> Result<(), DomainError> {
        self.name = require_text("category name", name.into())?;
        self.image_url = image_url;
        Ok(())
    }
}

/// A word tile ("image word") inside a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: Option<TileId>,
    /// The word or phrase spoken for this tile
    pub word: String,
    pub image_url: Option<String>,
    pub order_number: i32,
    pub category_id: CategoryId,
}

impl Tile {
    /// Create a not-yet-persisted tile
    pub fn new(
        word: impl Into<String>,
        image_url: Option<String>,
        order_number: i32,
        category_id: CategoryId,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id: None,
            word: require_text("word", word.into())?,
            image_url,
            order_number,
            category_id,
        })
    }

    /// Replace word and picture
    pub fn update(
        &mut self,
        word: impl Into<String>,
        image_url: Option<String>,
    ) -> Result<(), DomainError> {
        self.word = require_text("word", word.into())?;
        self.image_url = image_url;
        Ok(())
    }
}
