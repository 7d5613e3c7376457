//! User storage port

use async_trait::async_trait;
use domain::{User, UserId};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for registered-user persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Get a user by ID
    async fn find(&self, id: UserId) -> Result<Option<User>, ApplicationError>;

    /// Get a user by exact username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApplicationError>;

    /// Persist a new user, returning it with its assigned ID
    async fn save(&self, user: User) -> Result<User, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn UserStore>();
    }
}
