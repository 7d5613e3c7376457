//! Route policy
//!
//! Decides per path whether an anonymous caller may proceed. Registration,
//! login, image downloads and the health checks are open; everything else
//! under `/api/` needs an authenticated context; other paths are permitted.
//! Must sit inside [`AuthenticationGateLayer`](super::AuthenticationGateLayer)
//! so the context is already present.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use application::AuthenticationContext;
use axum::{
    extract::Request,
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};
use tracing::debug;

use crate::error::ApiError;

const OPEN_PATHS: &[&str] = &["/api/users/register", "/api/users/login", "/health", "/ready"];
const OPEN_PREFIXES: &[&str] = &["/api/images/"];
const PROTECTED_PREFIX: &str = "/api/";

/// Whether `path` needs an authenticated caller
pub fn requires_authentication(path: &str) -> bool {
    if OPEN_PATHS.contains(&path) || OPEN_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return false;
    }
    path.starts_with(PROTECTED_PREFIX)
}

/// Layer enforcing [`requires_authentication`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RoutePolicyLayer;

impl RoutePolicyLayer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for RoutePolicyLayer {
    type Service = RoutePolicy<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RoutePolicy { inner }
    }
}

#[derive(Debug, Clone)]
pub struct RoutePolicy<S> {
    inner: S,
}

impl<S> Service<Request> for RoutePolicy<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let authenticated = req
            .extensions()
            .get::<AuthenticationContext>()
            .is_some_and(AuthenticationContext::is_authenticated);

        if !authenticated && requires_authentication(req.uri().path()) {
            debug!(path = %req.uri().path(), "Anonymous request to protected route");
            let response = ApiError::Unauthorized("Missing or invalid bearer token".to_string())
                .into_response();
            return Box::pin(async move { Ok(response) });
        }

        let mut inner = self.inner.clone();
        Box::pin(async move { inner.call(req).await })
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, http::StatusCode, routing::get};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn open_routes() {
        for path in [
            "/api/users/register",
            "/api/users/login",
            "/api/images/seed/ma_tahan.png",
            "/health",
            "/ready",
        ] {
            assert!(!requires_authentication(path), "{path}");
        }
    }

    #[test]
    fn api_routes_are_protected() {
        for path in [
            "/api/users/1",
            "/api/profiles/user/1",
            "/api/text/process",
            "/api/images",
            "/api/users/register/extra",
        ] {
            assert!(requires_authentication(path), "{path}");
        }
    }

    #[test]
    fn non_api_routes_are_permitted() {
        assert!(!requires_authentication("/"));
        assert!(!requires_authentication("/index.html"));
        assert!(!requires_authentication("/apidocs"));
    }

    fn router(context: Option<AuthenticationContext>) -> Router {
        Router::new()
            .route("/api/text/audio", get(|| async { "spoken" }))
            .route("/api/users/login", get(|| async { "login" }))
            .layer(RoutePolicyLayer::new())
            .layer(axum::middleware::from_fn(
                move |mut req: Request, next: axum::middleware::Next| {
                    let context = context.clone();
                    async move {
                        if let Some(context) = context {
                            req.extensions_mut().insert(context);
                        }
                        next.run(req).await
                    }
                },
            ))
    }

    async fn status(app: Router, uri: &str) -> StatusCode {
        app.oneshot(
            axum::http::Request::builder()
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
        .status()
    }

    #[tokio::test]
    async fn anonymous_is_rejected_on_protected_route() {
        let anonymous = AuthenticationContext::anonymous(Uuid::now_v7());
        assert_eq!(
            status(router(Some(anonymous)), "/api/text/audio").await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn missing_context_is_rejected_on_protected_route() {
        assert_eq!(
            status(router(None), "/api/text/audio").await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn authenticated_passes() {
        let context = AuthenticationContext::authenticated("parent", Uuid::now_v7());
        assert_eq!(
            status(router(Some(context)), "/api/text/audio").await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn anonymous_may_log_in() {
        let anonymous = AuthenticationContext::anonymous(Uuid::now_v7());
        assert_eq!(
            status(router(Some(anonymous)), "/api/users/login").await,
            StatusCode::OK
        );
    }
}
