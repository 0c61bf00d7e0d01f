//! Business handlers and the request helpers they share.

pub mod backups;
pub mod users;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use serde::de::DeserializeOwned;

use frognote_core::error::AppError;
use frognote_core::result::AppResult;
use frognote_core::types::UserId;

use crate::error::Reply;
use crate::logger::Logger;
use crate::state::AppState;

/// Resolve the caller or fail with `401`.
pub(crate) fn require_user(state: &AppState, request: &Request<Body>) -> AppResult<UserId> {
    state
        .gate
        .authenticate(request)
        .ok_or_else(|| AppError::authentication("Unauthorized"))
}

/// Fail with `400` unless the request uses `method`.
pub(crate) fn require_method(request: &Request<Body>, method: Method) -> AppResult<()> {
    if request.method() != method {
        return Err(AppError::validation(format!(
            "expected {method}, got {}",
            request.method()
        )));
    }
    Ok(())
}

/// Fail with `400` unless the request uses `method` and carries JSON.
pub(crate) fn require_json(request: &Request<Body>, method: Method) -> AppResult<()> {
    require_method(request, method)?;
    let is_json = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"));
    if !is_json {
        return Err(AppError::validation("expected Content-Type: application/json"));
    }
    Ok(())
}

/// Read the whole body and decode it as JSON.
///
/// A body over `server.max_body_bytes` or one the client broke off is a
/// `400`, not a server fault.
pub(crate) async fn read_json<T: DeserializeOwned>(
    state: &AppState,
    request: Request<Body>,
) -> AppResult<T> {
    let limit = state.config.server.max_body_bytes;
    let bytes = axum::body::to_bytes(request.into_body(), limit)
        .await
        .map_err(|e| AppError::validation(format!("Could not read request body: {e}")))?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Turn a handler result into a reply, writing server-side failures to the
/// error log.
pub(crate) async fn finish(result: AppResult<Reply>, logger: &Logger, additional: &str) -> Reply {
    match result {
        Ok(reply) => reply,
        Err(err) => {
            if !err.is_client_error() {
                let detail = match std::error::Error::source(&err) {
                    Some(source) => format!("{err}: {source}"),
                    None => err.to_string(),
                };
                logger.error(&detail, additional).await;
            }
            Reply::from_error(&err)
        }
    }
}
