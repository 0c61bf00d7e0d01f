//! Axum middleware stack.

pub mod access_log;
pub mod cors;
