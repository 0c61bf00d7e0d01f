//! Bearer token resolution for inbound requests.

use std::sync::Arc;

use axum::http::Request;
use axum::http::header::AUTHORIZATION;

use frognote_core::types::UserId;

use crate::session::SessionRegistry;

/// Resolves the raw `Authorization: <token>` header of a request to a user.
#[derive(Debug, Clone)]
pub struct AuthorizationGate {
    sessions: Arc<SessionRegistry>,
}

impl AuthorizationGate {
    /// Creates a gate backed by `sessions`.
    pub fn new(sessions: Arc<SessionRegistry>) -> Self {
        Self { sessions }
    }

    /// Return the user bound to the request's token.
    ///
    /// A missing header, a repeated header, a value that is not visible
    /// ASCII, or an unknown token all yield `None`.
    pub fn authenticate<B>(&self, request: &Request<B>) -> Option<UserId> {
        let token = bearer_token(request)?;
        self.sessions.resolve(token)
    }

    /// Negation of [`authenticate`](Self::authenticate).
    pub fn is_unauthenticated<B>(&self, request: &Request<B>) -> bool {
        self.authenticate(request).is_none()
    }
}

/// Extract the single `Authorization` header value.
pub fn bearer_token<B>(request: &Request<B>) -> Option<&str> {
    let mut values = request.headers().get_all(AUTHORIZATION).iter();
    let value = values.next()?;
    if values.next().is_some() {
        return None;
    }
    value.to_str().ok()
}
