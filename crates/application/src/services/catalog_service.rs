//! Board catalog service
//!
//! Profile, category and tile management on top of the store ports,
//! including cascading deletes and the starter board given to new users.

use std::{fmt, sync::Arc};

use domain::{Category, CategoryId, ChildProfile, ProfileId, Tile, TileId, UserId};
use tracing::{debug, info, instrument};

use crate::{
    error::ApplicationError,
    ports::{CategoryStore, ProfileStore, TileStore, UserStore},
};

/// Name of the profile created for every new user
pub const DEFAULT_PROFILE_NAME: &str = "Vaikimisi";

/// Starter categories and their tiles
const DEFAULT_BOARD: &[(&str, &str, &[(&str, &str)])] = &[
    (
        "Algused",
        "/api/images/seed/algused.png",
        &[
            ("Ma tahan", "/api/images/seed/ma_tahan.png"),
            ("Ma näen", "/api/images/seed/ma_naen.png"),
        ],
    ),
    (
        "Tegevused",
        "/api/images/seed/tegevused.png",
        &[
            ("mängima", "/api/images/seed/mangima.png"),
            ("sööma", "/api/images/seed/sooma.png"),
            ("magama", "/api/images/seed/magama.png"),
        ],
    ),
];

/// A category together with its tiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBoard {
    pub category: Category,
    pub tiles: Vec<Tile>,
}

/// A profile with its full board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileBoard {
    pub profile: ChildProfile,
    pub categories: Vec<CategoryBoard>,
}

/// Service for board management
pub struct CatalogService {
    users: Arc<dyn UserStore>,
    profiles: Arc<dyn ProfileStore>,
    categories: Arc<dyn CategoryStore>,
    tiles: Arc<dyn TileStore>,
}

impl fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogService").finish_non_exhaustive()
    }
}

impl CatalogService {
    pub fn new(
        users: Arc<dyn UserStore>,
        profiles: Arc<dyn ProfileStore>,
        categories: Arc<dyn CategoryStore>,
        tiles: Arc<dyn TileStore>,
    ) -> Self {
        Self {
            users,
            profiles,
            categories,
            tiles,
        }
    }

    // ---- profiles ----

    pub async fn list_profiles(
        &self,
        user_id: UserId,
    ) -> Result<Vec<ChildProfile>, ApplicationError> {
        self.require_user(user_id).await?;
        self.profiles.list_by_user(user_id).await
    }

    /// Profile with every category and tile, ordered
    pub async fn get_profile(&self, id: ProfileId) -> Result<ProfileBoard, ApplicationError> {
        let profile = self.require_profile(id).await?;
        let mut categories = Vec::new();
        for category in self.sorted_categories(id).await? {
            categories.push(self.category_board(category).await?);
        }
        Ok(ProfileBoard {
            profile,
            categories,
        })
    }

    #[instrument(skip(self, name))]
    pub async fn create_profile(
        &self,
        user_id: UserId,
        name: &str,
    ) -> Result<ChildProfile, ApplicationError> {
        self.require_user(user_id).await?;
        self.profiles.save(ChildProfile::new(name, user_id)?).await
    }

    pub async fn rename_profile(
        &self,
        id: ProfileId,
        name: &str,
    ) -> Result<ChildProfile, ApplicationError> {
        let mut profile = self.require_profile(id).await?;
        profile.rename(name)?;
        self.profiles.save(profile).await
    }

    /// Delete a profile together with its categories and tiles
    #[instrument(skip(self))]
    pub async fn delete_profile(&self, id: ProfileId) -> Result<(), ApplicationError> {
        self.require_profile(id).await?;
        for category in self.categories.list_by_profile(id).await? {
            if let Some(category_id) = category.id {
                self.delete_category_tree(category_id).await?;
            }
        }
        self.profiles.delete(id).await?;
        info!(profile_id = %id, "Profile deleted");
        Ok(())
    }

    // ---- categories ----

    pub async fn list_categories(
        &self,
        profile_id: ProfileId,
    ) -> Result<Vec<Category>, ApplicationError> {
        self.require_profile(profile_id).await?;
        self.sorted_categories(profile_id).await
    }

    pub async fn get_category(&self, id: CategoryId) -> Result<CategoryBoard, ApplicationError> {
        let category = self.require_category(id).await?;
        self.category_board(category).await
    }

    /// Append a category at the end of the profile
    pub async fn create_category(
        &self,
        profile_id: ProfileId,
        name: &str,
        image_url: Option<String>,
    ) -> Result<Category, ApplicationError> {
        self.require_profile(profile_id).await?;
        let order = next_order(
            self.categories
                .list_by_profile(profile_id)
                .await?
                .iter()
                .map(|c| c.order_number),
        );
        self.categories
            .save(Category::new(name, image_url, order, profile_id)?)
            .await
    }

    pub async fn update_category(
        &self,
        id: CategoryId,
        name: &str,
        image_url: Option<String>,
    ) -> Result<Category, ApplicationError> {
        let mut category = self.require_category(id).await?;
        category.update(name, image_url)?;
        self.categories.save(category).await
    }

    /// Delete a category together with its tiles
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), ApplicationError> {
        self.require_category(id).await?;
        self.delete_category_tree(id).await
    }

    // ---- tiles ----

    pub async fn list_tiles(&self, category_id: CategoryId) -> Result<Vec<Tile>, ApplicationError> {
        self.require_category(category_id).await?;
        self.sorted_tiles(category_id).await
    }

    pub async fn get_tile(&self, id: TileId) -> Result<Tile, ApplicationError> {
        self.tiles
            .find(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Tile", id))
    }

    /// Append a tile at the end of the category
    pub async fn create_tile(
        &self,
        category_id: CategoryId,
        word: &str,
        image_url: Option<String>,
    ) -> Result<Tile, ApplicationError> {
        self.require_category(category_id).await?;
        let order = next_order(
            self.tiles
                .list_by_category(category_id)
                .await?
                .iter()
                .map(|t| t.order_number),
        );
        self.tiles
            .save(Tile::new(word, image_url, order, category_id)?)
            .await
    }

    pub async fn update_tile(
        &self,
        id: TileId,
        word: &str,
        image_url: Option<String>,
    ) -> Result<Tile, ApplicationError> {
        let mut tile = self.get_tile(id).await?;
        tile.update(word, image_url)?;
        self.tiles.save(tile).await
    }

    pub async fn delete_tile(&self, id: TileId) -> Result<(), ApplicationError> {
        if self.tiles.delete(id).await? {
            Ok(())
        } else {
            Err(ApplicationError::not_found("Tile", id))
        }
    }

    // ---- seeding ----

    /// Create the starter profile for a freshly registered user
    #[instrument(skip(self))]
    pub async fn seed_default_board(
        &self,
        user_id: UserId,
    ) -> Result<ChildProfile, ApplicationError> {
        let profile = self
            .profiles
            .save(ChildProfile::new(DEFAULT_PROFILE_NAME, user_id)?)
            .await?;
        let profile_id = saved_id(profile.id, "profile")?;

        for (order, (name, image, words)) in (0_i32..).zip(DEFAULT_BOARD) {
            let category = self
                .categories
                .save(Category::new(*name, Some((*image).to_string()), order, profile_id)?)
                .await?;
            let category_id = saved_id(category.id, "category")?;
            for (tile_order, (word, tile_image)) in (0_i32..).zip(*words) {
                self.tiles
                    .save(Tile::new(
                        *word,
                        Some((*tile_image).to_string()),
                        tile_order,
                        category_id,
                    )?)
                    .await?;
            }
        }

        debug!(profile_id = %profile_id, "Default board seeded");
        Ok(profile)
    }

    // ---- helpers ----

    async fn require_user(&self, id: UserId) -> Result<(), ApplicationError> {
        match self.users.find(id).await? {
            Some(_) => Ok(()),
            None => Err(ApplicationError::not_found("User", id)),
        }
    }

    async fn require_profile(&self, id: ProfileId) -> Result<ChildProfile, ApplicationError> {
        self.profiles
            .find(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("ChildProfile", id))
    }

    async fn require_category(&self, id: CategoryId) -> Result<Category, ApplicationError> {
        self.categories
            .find(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Category", id))
    }

    async fn sorted_categories(&self, id: ProfileId) -> Result<Vec<Category>, ApplicationError> {
        let mut categories = self.categories.list_by_profile(id).await?;
        categories.sort_by_key(|c| (c.order_number, c.id));
        Ok(categories)
    }

    async fn sorted_tiles(&self, id: CategoryId) -> Result<Vec<Tile>, ApplicationError> {
        let mut tiles = self.tiles.list_by_category(id).await?;
        tiles.sort_by_key(|t| (t.order_number, t.id));
        Ok(tiles)
    }

    async fn category_board(&self, category: Category) -> Result<CategoryBoard, ApplicationError> {
        let tiles = match category.id {
            Some(id) => self.sorted_tiles(id).await?,
            None => Vec::new(),
        };
        Ok(CategoryBoard { category, tiles })
    }

    async fn delete_category_tree(&self, id: CategoryId) -> Result<(), ApplicationError> {
        for tile in self.tiles.list_by_category(id).await? {
            if let Some(tile_id) = tile.id {
                self.tiles.delete(tile_id).await?;
            }
        }
        self.categories.delete(id).await?;
        Ok(())
    }
}

fn next_order(existing: impl Iterator<Item = i32>) -> i32 {
    existing.max().map_or(0, |max| max.saturating_add(1))
}

fn saved_id<T>(id: Option<T>, what: &str) -> Result<T, ApplicationError> {
    id.ok_or_else(|| ApplicationError::Internal(format!("saved {what} has no id")))
}
