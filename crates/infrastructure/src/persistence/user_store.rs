//! In-memory user store

use application::{error::ApplicationError, ports::UserStore};
use async_trait::async_trait;
use domain::{User, UserId};
use tracing::{debug, instrument};

use super::table::Table;

/// Users held in process memory
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: Table<User>,
}

impl InMemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find(&self, id: UserId) -> Result<Option<User>, ApplicationError> {
        Ok(self.users.get(id.value()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApplicationError> {
        Ok(self
            .users
            .filter(|u| u.username() == username)
            .into_iter()
            .next())
    }

    #[instrument(skip(self, user), fields(username = %user.username()))]
    async fn save(&self, user: User) -> Result<User, ApplicationError> {
        if let Some(id) = user.id() {
            if self.users.replace(id.value(), user.clone()) {
                return Ok(user);
            }
            return Err(ApplicationError::not_found("User", id));
        }

        if self.users.any(|u| u.username() == user.username()) {
            return Err(ApplicationError::Conflict(format!(
                "username '{}' is already taken",
                user.username()
            )));
        }

        let saved = self
            .users
            .insert_with(|id| user.with_id(UserId::new(id)));
        debug!(user_id = ?saved.id(), "User stored");
        Ok(saved)
    }
}
