//! Access logging around the whole router.

use std::net::SocketAddr;
use std::time::Instant;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::header::USER_AGENT;
use axum::middleware::Next;
use axum::response::Response;
use tracing::info;

use crate::logger::{AccessRecord, ResponseLog};
use crate::state::AppState;

/// Times the request, then writes one access-log row for whatever response
/// comes back, including `404` for unregistered paths.
pub async fn access_log(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());
    let uri = request.uri().to_string();
    let method = request.method().to_string();
    let protocol = format!("{:?}", request.version());
    let user_agent = request
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let start = Instant::now();
    let response = next.run(request).await;
    let log = ResponseLog::capture(&response, start.elapsed());

    info!(
        method = %method,
        path = %uri,
        status = log.status,
        duration_ms = log.elapsed.as_millis() as u64,
        "HTTP request"
    );

    state.logger.access(&AccessRecord {
        remote_addr,
        uri,
        method,
        protocol,
        user_agent,
        response: log,
    })
    .await;

    response
}
