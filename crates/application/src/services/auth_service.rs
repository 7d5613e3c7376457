//! Account and credential service
//!
//! Registers users and verifies login credentials. A successful login is
//! answered with a stateless bearer token from the [`TokenPort`]; every
//! failure is reported as the same `AuthenticationFailed` so callers cannot
//! tell an unknown username from a wrong password.

use std::{fmt, sync::Arc};

use domain::{EmailAddress, User, UserId};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{PasswordHasherPort, TokenPort, UserStore},
    services::CatalogService,
};

/// Shortest accepted password
pub const MIN_PASSWORD_LEN: usize = 6;

/// Well-formed Argon2id hash no password matches
///
/// Checked against when the username is unknown, so both login failures
/// cost one hash verification.
pub const DUMMY_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Outcome of a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSession {
    /// Signed bearer token
    pub token: String,
    /// Token subject (the username)
    pub identity: String,
    /// Numeric ID for follow-up lookups by the client
    pub user_id: UserId,
}

/// Registration input
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Service for registration, login and account lookup
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasherPort>,
    tokens: Arc<dyn TokenPort>,
    catalog: Option<Arc<CatalogService>>,
}

impl fmt::Debug for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthService")
            .field("seeds_default_board", &self.catalog.is_some())
            .finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasherPort>,
        tokens: Arc<dyn TokenPort>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            catalog: None,
        }
    }

    /// Seed a starter board for every newly registered user
    #[must_use]
    pub fn with_default_board(mut self, catalog: Arc<CatalogService>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Verify credentials and issue a token
    #[instrument(skip(self, password))]
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedSession, ApplicationError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            debug!("Login for unknown username");
            let _ = self.hasher.verify(password, DUMMY_PASSWORD_HASH).await;
            return Err(ApplicationError::AuthenticationFailed);
        };

        let matches = match self.hasher.verify(password, user.password_hash()).await {
            Ok(matches) => matches,
            Err(e) => {
                warn!(error = %e, "Stored password hash could not be checked");
                false
            },
        };
        if !matches {
            debug!("Login with wrong password");
            return Err(ApplicationError::AuthenticationFailed);
        }

        let user_id = user
            .id()
            .ok_or_else(|| ApplicationError::Internal("stored user has no id".to_string()))?;
        let token = self
            .tokens
            .issue(user.username())
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;

        info!(user_id = %user_id, "User authenticated");
        Ok(AuthenticatedSession {
            token,
            identity: user.username().to_string(),
            user_id,
        })
    }

    /// Register a new account
    #[instrument(skip(self, account), fields(username = %account.username))]
    pub async fn register(&self, account: NewAccount) -> Result<User, ApplicationError> {
        if account.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(domain::DomainError::ValidationError(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            ))
            .into());
        }
        let email = EmailAddress::new(account.email)?;

        let username = account.username.trim();
        if self.users.find_by_username(username).await?.is_some() {
            return Err(ApplicationError::Conflict(format!(
                "username '{username}' is already taken"
            )));
        }

        let hash = self.hasher.hash(&account.password).await?;
        let user = self.users.save(User::new(username, email, hash)?).await?;
        let user_id = user
            .id()
            .ok_or_else(|| ApplicationError::Internal("saved user has no id".to_string()))?;

        if let Some(catalog) = &self.catalog {
            catalog.seed_default_board(user_id).await?;
        }

        info!(user_id = %user_id, "User registered");
        Ok(user)
    }

    /// Look up an account by ID
    pub async fn get_user(&self, id: UserId) -> Result<User, ApplicationError> {
        self.users
            .find(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("User", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{
        MockCategoryStore, MockPasswordHasherPort, MockProfileStore, MockTileStore,
        MockTokenPort, MockUserStore, TokenError,
    };

    fn stored_user() -> User {
        User::new(
            "parent",
            EmailAddress::new("parent@example.com").unwrap(),
            "$argon2id$stored",
        )
        .unwrap()
        .with_id(UserId::new(7))
    }

    fn service(
        users: MockUserStore,
        hasher: MockPasswordHasherPort,
        tokens: MockTokenPort,
    ) -> AuthService {
        AuthService::new(Arc::new(users), Arc::new(hasher), Arc::new(tokens))
    }

    #[tokio::test]
    async fn valid_credentials_yield_token_and_user_id() {
        let mut users = MockUserStore::new();
        users
            .expect_find_by_username()
            .withf(|name| name == "parent")
            .returning(|_| Ok(Some(stored_user())));
        let mut hasher = MockPasswordHasherPort::new();
        hasher
            .expect_verify()
            .withf(|pw, hash| pw == "secret1" && hash == "$argon2id$stored")
            .returning(|_, _| Ok(true));
        let mut tokens = MockTokenPort::new();
        tokens
            .expect_issue()
            .withf(|name| name == "parent")
            .returning(|_| Ok("signed.token.value".to_string()));

        let session = service(users, hasher, tokens)
            .authenticate("parent", "secret1")
            .await
            .unwrap();

        assert_eq!(session.token, "signed.token.value");
        assert_eq!(session.identity, "parent");
        assert_eq!(session.user_id, UserId::new(7));
    }

    #[tokio::test]
    async fn unknown_user_and_wrong_password_fail_identically() {
        let mut users = MockUserStore::new();
        users.expect_find_by_username().returning(|name| {
            if name == "parent" {
                Ok(Some(stored_user()))
            } else {
                Ok(None)
            }
        });
        let mut hasher = MockPasswordHasherPort::new();
        hasher.expect_verify().returning(|_, _| Ok(false));
        let mut tokens = MockTokenPort::new();
        tokens.expect_issue().never();
        let svc = service(users, hasher, tokens);

        let unknown = svc.authenticate("nobody", "secret1").await.unwrap_err();
        let wrong = svc.authenticate("parent", "wrong-pw").await.unwrap_err();

        assert!(matches!(unknown, ApplicationError::AuthenticationFailed));
        assert!(matches!(wrong, ApplicationError::AuthenticationFailed));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn unknown_user_still_costs_one_hash_verification() {
        let mut users = MockUserStore::new();
        users.expect_find_by_username().returning(|_| Ok(None));
        let mut hasher = MockPasswordHasherPort::new();
        hasher
            .expect_verify()
            .withf(|pw, hash| pw == "pw" && hash == DUMMY_PASSWORD_HASH)
            .times(1)
            .returning(|_, _| Ok(false));
        let mut tokens = MockTokenPort::new();
        tokens.expect_issue().never();

        let err = service(users, hasher, tokens)
            .authenticate("ghost", "pw")
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn unreadable_hash_is_a_plain_authentication_failure() {
        let mut users = MockUserStore::new();
        users
            .expect_find_by_username()
            .returning(|_| Ok(Some(stored_user())));
        let mut hasher = MockPasswordHasherPort::new();
        hasher
            .expect_verify()
            .returning(|_, _| Err(ApplicationError::Internal("bad phc".into())));

        let err = service(users, hasher, MockTokenPort::new())
            .authenticate("parent", "secret1")
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn token_failure_is_internal() {
        let mut users = MockUserStore::new();
        users
            .expect_find_by_username()
            .returning(|_| Ok(Some(stored_user())));
        let mut hasher = MockPasswordHasherPort::new();
        hasher.expect_verify().returning(|_, _| Ok(true));
        let mut tokens = MockTokenPort::new();
        tokens
            .expect_issue()
            .returning(|_| Err(TokenError::Encoding("boom".into())));

        let err = service(users, hasher, tokens)
            .authenticate("parent", "secret1")
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Internal(_)));
    }

    #[tokio::test]
    async fn register_hashes_password_and_saves() {
        let mut users = MockUserStore::new();
        users.expect_find_by_username().returning(|_| Ok(None));
        users
            .expect_save()
            .withf(|u| u.username() == "newparent" && u.password_hash() == "hashed")
            .returning(|u| Ok(u.with_id(UserId::new(1))));
        let mut hasher = MockPasswordHasherPort::new();
        hasher
            .expect_hash()
            .withf(|pw| pw == "secret1")
            .returning(|_| Ok("hashed".to_string()));

        let user = service(users, hasher, MockTokenPort::new())
            .register(NewAccount {
                username: " newparent ".into(),
                email: "new@example.com".into(),
                password: "secret1".into(),
            })
            .await
            .unwrap();
        assert_eq!(user.id(), Some(UserId::new(1)));
    }

    #[tokio::test]
    async fn register_rejects_taken_username() {
        let mut users = MockUserStore::new();
        users
            .expect_find_by_username()
            .returning(|_| Ok(Some(stored_user())));
        users.expect_save().never();

        let err = service(users, MockPasswordHasherPort::new(), MockTokenPort::new())
            .register(NewAccount {
                username: "parent".into(),
                email: "p@example.com".into(),
                password: "secret1".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Conflict(_)));
    }

    #[tokio::test]
    async fn register_rejects_short_password_and_bad_email() {
        let svc = service(
            MockUserStore::new(),
            MockPasswordHasherPort::new(),
            MockTokenPort::new(),
        );
        let short = svc
            .register(NewAccount {
                username: "a".into(),
                email: "a@example.com".into(),
                password: "123".into(),
            })
            .await;
        let email = svc
            .register(NewAccount {
                username: "a".into(),
                email: "nope".into(),
                password: "secret1".into(),
            })
            .await;
        assert!(matches!(short, Err(ApplicationError::Domain(_))));
        assert!(matches!(email, Err(ApplicationError::Domain(_))));
    }

    #[tokio::test]
    async fn register_seeds_default_board_when_configured() {
        let mut users = MockUserStore::new();
        users.expect_find_by_username().returning(|_| Ok(None));
        users
            .expect_save()
            .returning(|u| Ok(u.with_id(UserId::new(3))));
        let mut hasher = MockPasswordHasherPort::new();
        hasher.expect_hash().returning(|_| Ok("hashed".to_string()));

        let mut profiles = MockProfileStore::new();
        profiles
            .expect_save()
            .times(1)
            .withf(|p| p.user_id == UserId::new(3))
            .returning(|mut p| {
                p.id = Some(domain::ProfileId::new(1));
                Ok(p)
            });
        let mut categories = MockCategoryStore::new();
        categories.expect_save().times(2).returning(|mut c| {
            c.id = Some(domain::CategoryId::new(i64::from(c.order_number) + 1));
            Ok(c)
        });
        let mut tiles = MockTileStore::new();
        tiles.expect_save().times(5).returning(Ok);
        let catalog = Arc::new(CatalogService::new(
            Arc::new(MockUserStore::new()),
            Arc::new(profiles),
            Arc::new(categories),
            Arc::new(tiles),
        ));

        service(users, hasher, MockTokenPort::new())
            .with_default_board(catalog)
            .register(NewAccount {
                username: "seeded".into(),
                email: "s@example.com".into(),
                password: "secret1".into(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn get_user_reports_missing_user() {
        let mut users = MockUserStore::new();
        users.expect_find().returning(|_| Ok(None));

        let err = service(users, MockPasswordHasherPort::new(), MockTokenPort::new())
            .get_user(UserId::new(99))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "User not found: 99");
    }
}
