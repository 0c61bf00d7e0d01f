//! Route table for the FrogNote HTTP API.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::routing::any;

use crate::dispatch::{Route, dispatch};
use crate::handlers;
use crate::state::AppState;

/// Every registered route.
pub fn routes() -> Vec<Route> {
    let mut routes = handlers::users::routes();
    routes.extend(handlers::backups::routes());
    routes
}

/// Mount `routes` on an Axum router. Each path accepts every method and
/// leaves method checks to its handler.
pub fn build_router(routes: Vec<Route>) -> Router<AppState> {
    routes.into_iter().fold(Router::new(), |router, route| {
        let handler = Arc::clone(&route.handler);
        router.route(
            route.pattern,
            any(move |State(state): State<AppState>, request: Request<Body>| {
                let handler = Arc::clone(&handler);
                async move { dispatch(handler.as_ref(), state, request).await }
            }),
        )
    })
}
