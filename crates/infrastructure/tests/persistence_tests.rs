//! Integration tests for the in-memory stores
//!
//! Runs the application services on top of the real stores and hasher, so
//! registration, login, seeding and cascading deletes are exercised end to end.

use std::sync::Arc;

use application::{
    ApplicationError, AuthService, CatalogService, DEFAULT_PROFILE_NAME, NewAccount,
    ports::{CategoryStore, ProfileStore, TileStore, UserStore},
};
use chrono::Duration;
use domain::{CategoryId, ChildProfile, DomainError, EmailAddress, ProfileId, TileId, User, UserId};
use infrastructure::{
    Argon2PasswordHasher, InMemoryCategoryStore, InMemoryProfileStore, InMemoryTileStore,
    InMemoryUserStore, TokenCodec,
};

const SECRET: &[u8] = b"integration-secret-0123456789abcdef";

struct Fixture {
    users: Arc<InMemoryUserStore>,
    profiles: Arc<InMemoryProfileStore>,
    categories: Arc<InMemoryCategoryStore>,
    tiles: Arc<InMemoryTileStore>,
    catalog: Arc<CatalogService>,
    auth: AuthService,
}

fn fixture() -> Fixture {
    let users = Arc::new(InMemoryUserStore::new());
    let profiles = Arc::new(InMemoryProfileStore::new());
    let categories = Arc::new(InMemoryCategoryStore::new());
    let tiles = Arc::new(InMemoryTileStore::new());
    let catalog = Arc::new(CatalogService::new(
        users.clone(),
        profiles.clone(),
        categories.clone(),
        tiles.clone(),
    ));
    let tokens = Arc::new(TokenCodec::new(SECRET, Duration::hours(10)).unwrap());
    let auth = AuthService::new(users.clone(), Arc::new(Argon2PasswordHasher::new()), tokens)
        .with_default_board(catalog.clone());

    Fixture {
        users,
        profiles,
        categories,
        tiles,
        catalog,
        auth,
    }
}

fn account(username: &str) -> NewAccount {
    NewAccount {
        username: username.to_string(),
        email: format!("{username}@example.ee"),
        password: "salasõna".to_string(),
    }
}

fn user(username: &str) -> User {
    User::new(
        username,
        EmailAddress::new(format!("{username}@example.ee")).unwrap(),
        "$argon2id$stub",
    )
    .unwrap()
}

// ============================================================================
// Store behavior
// ============================================================================

#[tokio::test]
async fn user_store_assigns_ids_and_finds_by_username() {
    let store = InMemoryUserStore::new();

    let alice = store.save(user("alice")).await.unwrap();
    let bob = store.save(user("bob")).await.unwrap();

    assert_eq!(alice.id(), Some(UserId::new(1)));
    assert_eq!(bob.id(), Some(UserId::new(2)));
    assert_eq!(
        store.find_by_username("bob").await.unwrap().and_then(|u| u.id()),
        Some(UserId::new(2))
    );
    assert!(store.find_by_username("carol").await.unwrap().is_none());
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn user_store_rejects_duplicate_username() {
    let store = InMemoryUserStore::new();
    store.save(user("alice")).await.unwrap();

    let err = store.save(user("alice")).await.unwrap_err();

    assert!(matches!(err, ApplicationError::Conflict(_)));
}

#[tokio::test]
async fn saving_unknown_id_is_not_found() {
    let profiles = InMemoryProfileStore::new();
    let mut profile = ChildProfile::new("Mia", UserId::new(1)).unwrap();
    profile.id = Some(ProfileId::new(42));

    let err = profiles.save(profile).await.unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn save_with_id_replaces_row() {
    let profiles = InMemoryProfileStore::new();
    let mut profile = profiles
        .save(ChildProfile::new("Mia", UserId::new(1)).unwrap())
        .await
        .unwrap();

    profile.rename("Mihkel").unwrap();
    profiles.save(profile.clone()).await.unwrap();

    let stored = profiles.find(profile.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(stored.name, "Mihkel");
    assert_eq!(profiles.list_by_user(UserId::new(1)).await.unwrap().len(), 1);
}

// ============================================================================
// Services on in-memory stores
// ============================================================================

#[tokio::test]
async fn registration_seeds_default_board() {
    let f = fixture();

    let user = f.auth.register(account("mari")).await.unwrap();
    let user_id = user.id().unwrap();

    let profiles = f.catalog.list_profiles(user_id).await.unwrap();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].name, DEFAULT_PROFILE_NAME);

    let board = f.catalog.get_profile(profiles[0].id.unwrap()).await.unwrap();
    let names: Vec<_> = board.categories.iter().map(|c| c.category.name.as_str()).collect();
    assert_eq!(names, vec!["Algused", "Tegevused"]);
    let words: Vec<_> = board.categories[1].tiles.iter().map(|t| t.word.as_str()).collect();
    assert_eq!(words, vec!["mängima", "sööma", "magama"]);
}

#[tokio::test]
async fn login_after_registration_issues_verifiable_token() {
    let f = fixture();
    let user = f.auth.register(account("mari")).await.unwrap();

    let session = f.auth.authenticate("mari", "salasõna").await.unwrap();

    assert_eq!(session.user_id, user.id().unwrap());
    assert_eq!(session.identity, "mari");
    let codec = TokenCodec::new(SECRET, Duration::hours(10)).unwrap();
    assert_eq!(
        application::ports::TokenPort::verify(&codec, &session.token).unwrap(),
        "mari"
    );
}

#[tokio::test]
async fn wrong_password_and_unknown_user_fail_identically() {
    let f = fixture();
    f.auth.register(account("mari")).await.unwrap();

    let wrong = f.auth.authenticate("mari", "vale-parool").await.unwrap_err();
    let unknown = f.auth.authenticate("jaan", "salasõna").await.unwrap_err();

    assert!(matches!(wrong, ApplicationError::AuthenticationFailed));
    assert!(matches!(unknown, ApplicationError::AuthenticationFailed));
    assert_eq!(wrong.to_string(), unknown.to_string());
}

#[tokio::test]
async fn taken_username_is_conflict() {
    let f = fixture();
    f.auth.register(account("mari")).await.unwrap();

    let err = f.auth.register(account("mari")).await.unwrap_err();

    assert!(matches!(err, ApplicationError::Conflict(_)));
    assert_eq!(f.users.len(), 1);
}

#[tokio::test]
async fn new_tiles_are_appended_in_order() {
    let f = fixture();
    let user = f.auth.register(account("mari")).await.unwrap();
    let profile = f.catalog.create_profile(user.id().unwrap(), "Mia").await.unwrap();
    let category = f
        .catalog
        .create_category(profile.id.unwrap(), "Söök", None)
        .await
        .unwrap();
    let category_id = category.id.unwrap();

    let first = f.catalog.create_tile(category_id, "leib", None).await.unwrap();
    let second = f.catalog.create_tile(category_id, "piim", None).await.unwrap();

    assert!(second.order_number > first.order_number);
    let words: Vec<_> = f
        .tiles
        .list_by_category(category_id)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.word)
        .collect();
    assert_eq!(words, vec!["leib", "piim"]);
}

#[tokio::test]
async fn deleting_profile_cascades_to_categories_and_tiles() {
    let f = fixture();
    let user = f.auth.register(account("mari")).await.unwrap();
    let profile_id = f.catalog.list_profiles(user.id().unwrap()).await.unwrap()[0]
        .id
        .unwrap();
    let board = f.catalog.get_profile(profile_id).await.unwrap();
    let category_ids: Vec<CategoryId> = board
        .categories
        .iter()
        .filter_map(|c| c.category.id)
        .collect();
    let tile_ids: Vec<TileId> = board
        .categories
        .iter()
        .flat_map(|c| c.tiles.iter().filter_map(|t| t.id))
        .collect();
    assert_eq!(tile_ids.len(), 5);

    f.catalog.delete_profile(profile_id).await.unwrap();

    assert!(f.profiles.find(profile_id).await.unwrap().is_none());
    for id in category_ids {
        assert!(f.categories.find(id).await.unwrap().is_none());
    }
    for id in tile_ids {
        assert!(f.tiles.find(id).await.unwrap().is_none());
    }
    assert!(matches!(
        f.catalog.delete_profile(profile_id).await,
        Err(ApplicationError::Domain(DomainError::NotFound { .. }))
    ));
}
