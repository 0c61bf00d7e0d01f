//! Application builder: wires routes, middleware and state into an Axum app.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use tower_http::trace::TraceLayer;

use crate::dispatch::Route;
use crate::middleware::access_log::access_log;
use crate::router::{build_router, routes};
use crate::state::AppState;

/// Build the complete application with the standard route table.
pub fn build_app(state: AppState) -> Router {
    build_app_with_routes(state, routes())
}

/// Build the application around an explicit route table.
pub fn build_app_with_routes(state: AppState, routes: Vec<Route>) -> Router {
    let max_body = state.config.server.max_body_bytes;

    build_router(routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn_with_state(state.clone(), access_log))
        .with_state(state)
}
