//! Fixed CORS response headers.

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderMap, HeaderValue};

use frognote_core::config::CorsConfig;
use frognote_core::error::AppError;

/// The three CORS headers set on every dispatched response.
#[derive(Debug, Clone)]
pub struct CorsHeaders {
    allow_origin: HeaderValue,
    allow_headers: HeaderValue,
    allow_methods: HeaderValue,
}

impl CorsHeaders {
    /// Build header values from configuration.
    pub fn from_config(config: &CorsConfig) -> Result<Self, AppError> {
        Ok(Self {
            allow_origin: header_value("allowed_origin", &config.allowed_origin)?,
            allow_headers: header_value("allowed_headers", &config.allowed_headers)?,
            allow_methods: header_value("allowed_methods", &config.allowed_methods)?,
        })
    }

    /// Set the headers, replacing any existing values.
    pub fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods.clone());
    }
}

fn header_value(key: &str, value: &str) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(value).map_err(|e| {
        AppError::configuration(format!("server.cors.{key} is not a valid header value: {e}"))
    })
}
