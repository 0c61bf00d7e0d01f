//! # frognote-api
//!
//! HTTP API layer for FrogNote built on Axum.
//!
//! Every registered route goes through the request dispatch pipeline in
//! [`dispatch`]: CORS headers, pre-flight short-circuit, then the business
//! handler. The [`middleware::access_log`] layer around the whole router
//! writes one access-log row per request.

pub mod app;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod logger;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_app_with_routes};
pub use dispatch::{Handler, Route};
pub use error::Reply;
pub use logger::Logger;
pub use state::AppState;
