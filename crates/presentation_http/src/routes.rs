//! Route definitions

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    handlers,
    middleware::{AuthenticationGateLayer, RequestIdLayer, RoutePolicyLayer},
    state::AppState,
};

/// Create the router with every route and the authentication stack
///
/// Layers run outermost first: request ID, authentication gate, route
/// policy, then the handler.
pub fn create_router(state: AppState) -> Router {
    let tokens = Arc::clone(&state.tokens);

    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Accounts
        .route("/api/users/register", post(handlers::users::register))
        .route("/api/users/login", post(handlers::users::login))
        .route("/api/users/{id}", get(handlers::users::get_user))
        // Profiles
        .route(
            "/api/profiles/user/{user_id}",
            get(handlers::profiles::list_profiles).post(handlers::profiles::create_profile),
        )
        .route(
            "/api/profiles/{id}",
            get(handlers::profiles::get_profile)
                .put(handlers::profiles::rename_profile)
                .delete(handlers::profiles::delete_profile),
        )
        // Categories
        .route(
            "/api/categories/profile/{profile_id}",
            get(handlers::categories::list_categories)
                .post(handlers::categories::create_category),
        )
        .route(
            "/api/categories/{id}",
            get(handlers::categories::get_category)
                .put(handlers::categories::update_category)
                .delete(handlers::categories::delete_category),
        )
        // Tiles
        .route(
            "/api/imagewords/category/{category_id}",
            get(handlers::tiles::list_tiles).post(handlers::tiles::create_tile),
        )
        .route(
            "/api/imagewords/{id}",
            get(handlers::tiles::get_tile)
                .put(handlers::tiles::update_tile)
                .delete(handlers::tiles::delete_tile),
        )
        // Sentence pipeline
        .route("/api/text/conjugate", post(handlers::text::conjugate))
        .route("/api/text/process", post(handlers::text::process))
        .route("/api/text/audio", post(handlers::text::audio))
        .with_state(state)
        .layer(RoutePolicyLayer::new())
        .layer(AuthenticationGateLayer::new(tokens))
        .layer(RequestIdLayer::new())
}
