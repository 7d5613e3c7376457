//! Application state shared across handlers

use std::{fmt, sync::Arc};

use application::{AuthService, CatalogService, SentenceService, TokenPort};
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Registration, login and account lookup
    pub auth_service: Arc<AuthService>,
    /// Profiles, categories and tiles
    pub catalog_service: Arc<CatalogService>,
    /// Normalization and speech for sentence strips
    pub sentence_service: Arc<SentenceService>,
    /// Bearer token verification for the authentication gate
    pub tokens: Arc<dyn TokenPort>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("environment", &self.config.environment())
            .finish_non_exhaustive()
    }
}
