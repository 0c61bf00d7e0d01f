//! Request dispatch pipeline.
//!
//! A [`Route`] binds a path to a [`Handler`]. [`dispatch`] applies the CORS
//! headers, answers pre-flight requests itself, and otherwise hands the
//! request to the handler together with the shared logger.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::{IntoResponse, Response};

use crate::error::Reply;
use crate::logger::Logger;
use crate::state::AppState;

/// A business handler. Checks authorization itself and writes the error
/// log when it fails.
#[async_trait]
pub trait Handler: Send + Sync + 'static {
    /// Produce the reply for one request.
    async fn handle(&self, state: AppState, request: Request<Body>, logger: Arc<Logger>) -> Reply;
}

#[async_trait]
impl<F, Fut> Handler for F
where
    F: Fn(AppState, Request<Body>, Arc<Logger>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Reply> + Send + 'static,
{
    async fn handle(&self, state: AppState, request: Request<Body>, logger: Arc<Logger>) -> Reply {
        (self)(state, request, logger).await
    }
}

/// A path bound to its handler.
#[derive(Clone)]
pub struct Route {
    /// Exact request path, e.g. `/user/auth`.
    pub pattern: &'static str,
    /// The handler invoked for every non-preflight request.
    pub handler: Arc<dyn Handler>,
}

impl Route {
    /// Bind an async function to `pattern`.
    pub fn new<F, Fut>(pattern: &'static str, handler: F) -> Self
    where
        F: Fn(AppState, Request<Body>, Arc<Logger>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Reply> + Send + 'static,
    {
        Self::with_handler(pattern, Arc::new(handler))
    }

    /// Bind an existing handler to `pattern`.
    pub fn with_handler(pattern: &'static str, handler: Arc<dyn Handler>) -> Self {
        Self { pattern, handler }
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route").field("pattern", &self.pattern).finish()
    }
}

/// Run one request through CORS, pre-flight handling and the handler.
pub async fn dispatch(handler: &dyn Handler, state: AppState, request: Request<Body>) -> Response {
    let cors = state.cors.clone();

    let mut response = if request.method() == Method::OPTIONS {
        Reply::empty().into_response()
    } else {
        let logger = Arc::clone(&state.logger);
        handler.handle(state, request, logger).await.into_response()
    };

    cors.apply(response.headers_mut());
    response
}
