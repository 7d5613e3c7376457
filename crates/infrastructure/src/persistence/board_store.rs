//! In-memory board stores: profiles, categories and tiles
//!
//! Each store owns one table. Cascading deletes are the catalog service's
//! job; the stores only remove the row they are asked to.

use application::{
    error::ApplicationError,
    ports::{CategoryStore, ProfileStore, TileStore},
};
use async_trait::async_trait;
use domain::{Category, CategoryId, ChildProfile, ProfileId, Tile, TileId, UserId};

use super::table::Table;

/// Insert when `id` is `None`, otherwise replace the existing row
fn upsert<T: Clone>(
    table: &Table<T>,
    entity: &'static str,
    id: Option<i64>,
    row: T,
    assign: impl FnOnce(T, i64) -> T,
) -> Result<T, ApplicationError> {
    match id {
        Some(id) if table.replace(id, row.clone()) => Ok(row),
        Some(id) => Err(ApplicationError::not_found(entity, id)),
        None => Ok(table.insert_with(|new_id| assign(row, new_id))),
    }
}

/// Child profiles held in process memory
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: Table<ChildProfile>,
}

impl InMemoryProfileStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn find(&self, id: ProfileId) -> Result<Option<ChildProfile>, ApplicationError> {
        Ok(self.profiles.get(id.value()))
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<ChildProfile>, ApplicationError> {
        Ok(self.profiles.filter(|p| p.user_id == user_id))
    }

    async fn save(&self, profile: ChildProfile) -> Result<ChildProfile, ApplicationError> {
        let id = profile.id.map(ProfileId::value);
        upsert(&self.profiles, "Profile", id, profile, |mut p, new_id| {
            p.id = Some(ProfileId::new(new_id));
            p
        })
    }

    async fn delete(&self, id: ProfileId) -> Result<bool, ApplicationError> {
        Ok(self.profiles.remove(id.value()))
    }
}

/// Categories held in process memory
#[derive(Debug, Default)]
pub struct InMemoryCategoryStore {
    categories: Table<Category>,
}

impl InMemoryCategoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryStore for InMemoryCategoryStore {
    async fn find(&self, id: CategoryId) -> Result<Option<Category>, ApplicationError> {
        Ok(self.categories.get(id.value()))
    }

    async fn list_by_profile(
        &self,
        profile_id: ProfileId,
    ) -> Result<Vec<Category>, ApplicationError> {
        let mut categories = self.categories.filter(|c| c.profile_id == profile_id);
        categories.sort_by_key(|c| c.order_number);
        Ok(categories)
    }

    async fn save(&self, category: Category) -> Result<Category, ApplicationError> {
        let id = category.id.map(CategoryId::value);
        upsert(&self.categories, "Category", id, category, |mut c, new_id| {
            c.id = Some(CategoryId::new(new_id));
            c
        })
    }

    async fn delete(&self, id: CategoryId) -> Result<bool, ApplicationError> {
        Ok(self.categories.remove(id.value()))
    }
}

/// Word tiles held in process memory
#[derive(Debug, Default)]
pub struct InMemoryTileStore {
    tiles: Table<Tile>,
}

impl InMemoryTileStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TileStore for InMemoryTileStore {
    async fn find(&self, id: TileId) -> Result<Option<Tile>, ApplicationError> {
        Ok(self.tiles.get(id.value()))
    }

    async fn list_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Tile>, ApplicationError> {
        let mut tiles = self.tiles.filter(|t| t.category_id == category_id);
        tiles.sort_by_key(|t| t.order_number);
        Ok(tiles)
    }

    async fn save(&self, tile: Tile) -> Result<Tile, ApplicationError> {
        let id = tile.id.map(TileId::value);
        upsert(&self.tiles, "Tile", id, tile, |mut t, new_id| {
            t.id = Some(TileId::new(new_id));
            t
        })
    }

    async fn delete(&self, id: TileId) -> Result<bool, ApplicationError> {
        Ok(self.tiles.remove(id.value()))
    }
}
