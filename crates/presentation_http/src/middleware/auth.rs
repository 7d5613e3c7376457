//! Authentication gate
//!
//! Runs before every handler and turns the `Authorization: Bearer <token>`
//! header into an [`AuthenticationContext`] stored in the request
//! extensions. The gate never rejects: a missing header, a foreign scheme or
//! a token that fails verification all yield an anonymous context, and the
//! route policy decides whether anonymous callers may proceed.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use application::{AuthenticationContext, TokenPort};
use axum::{extract::Request, http::header::AUTHORIZATION, response::Response};
use tower::{Layer, Service};
use tracing::debug;
use uuid::Uuid;

use crate::middleware::RequestId;

const BEARER_PREFIX: &str = "Bearer ";

/// Layer that resolves the caller identity from a bearer token
#[derive(Clone)]
pub struct AuthenticationGateLayer {
    tokens: Arc<dyn TokenPort>,
}

impl std::fmt::Debug for AuthenticationGateLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationGateLayer").finish_non_exhaustive()
    }
}

impl AuthenticationGateLayer {
    pub fn new(tokens: Arc<dyn TokenPort>) -> Self {
        Self { tokens }
    }
}

impl<S> Layer<S> for AuthenticationGateLayer {
    type Service = AuthenticationGate<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthenticationGate {
            inner,
            tokens: Arc::clone(&self.tokens),
        }
    }
}

/// Middleware service behind [`AuthenticationGateLayer`]
#[derive(Clone)]
pub struct AuthenticationGate<S> {
    inner: S,
    tokens: Arc<dyn TokenPort>,
}

impl<S> std::fmt::Debug for AuthenticationGate<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationGate").finish_non_exhaustive()
    }
}

impl<S> Service<Request> for AuthenticationGate<S>
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

    fn call(&mut self, mut req: Request) -> Self::Future {
        let context = resolve(self.tokens.as_ref(), &req);
        req.extensions_mut().insert(context);

        let mut inner = self.inner.clone();
        Box::pin(async move { inner.call(req).await })
    }
}

/// Build the per-request context from the request headers
fn resolve(tokens: &dyn TokenPort, req: &Request) -> AuthenticationContext {
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map_or_else(Uuid::now_v7, |r| r.0);

    let Some(header) = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    else {
        return AuthenticationContext::anonymous(request_id);
    };

    let Some(token) = header.strip_prefix(BEARER_PREFIX) else {
        debug!("Authorization header without bearer scheme");
        return AuthenticationContext::anonymous(request_id);
    };

    match tokens.verify(token.trim()) {
        Ok(identity) => AuthenticationContext::authenticated(identity, request_id),
        Err(e) => {
            debug!(error = %e, "Bearer token rejected");
            AuthenticationContext::anonymous(request_id)
        },
    }
}
