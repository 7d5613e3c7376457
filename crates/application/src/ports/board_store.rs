//! Board storage ports
//!
//! Plain find/save/delete collaborators keyed by numeric identifiers.
//! `save` inserts when the entity has no ID yet and replaces otherwise.

use async_trait::async_trait;
use domain::{Category, CategoryId, ChildProfile, ProfileId, Tile, TileId, UserId};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Child profile persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find(&self, id: ProfileId) -> Result<Option<ChildProfile>, ApplicationError>;

    /// Profiles of one user, in creation order
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<ChildProfile>, ApplicationError>;

    async fn save(&self, profile: ChildProfile) -> Result<ChildProfile, ApplicationError>;

    /// Returns `true` if something was deleted
    async fn delete(&self, id: ProfileId) -> Result<bool, ApplicationError>;
}

/// Category persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn find(&self, id: CategoryId) -> Result<Option<Category>, ApplicationError>;

    /// Categories of one profile ordered by `order_number`
    async fn list_by_profile(
        &self,
        profile_id: ProfileId,
    ) -> Result<Vec<Category>, ApplicationError>;

    async fn save(&self, category: Category) -> Result<Category, ApplicationError>;

    async fn delete(&self, id: CategoryId) -> Result<bool, ApplicationError>;
}

/// Word tile persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TileStore: Send + Sync {
    async fn find(&self, id: TileId) -> Result<Option<Tile>, ApplicationError>;

    /// Tiles of one category ordered by `order_number`
    async fn list_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Tile>, ApplicationError>;

    async fn save(&self, tile: Tile) -> Result<Tile, ApplicationError>;

    async fn delete(&self, id: TileId) -> Result<bool, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_are_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ProfileStore>();
        assert_send_sync::<dyn CategoryStore>();
        assert_send_sync::<dyn TileStore>();
    }
}
