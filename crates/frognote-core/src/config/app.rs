//! Server and CORS configuration.

use serde::{Deserialize, Serialize};

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Largest accepted request body (backup uploads included).
    #[serde(default = "default_max_body")]
    pub max_body_bytes: usize,
    /// CORS configuration.
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body(),
            cors: CorsConfig::default(),
        }
    }
}

/// Cross-origin headers stamped on every response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Value of `Access-Control-Allow-Origin`.
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
    /// Value of `Access-Control-Allow-Headers`.
    #[serde(default = "default_allowed_headers")]
    pub allowed_headers: String,
    /// Value of `Access-Control-Allow-Methods`.
    #[serde(default = "default_allowed_methods")]
    pub allowed_methods: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: default_allowed_origin(),
            allowed_headers: default_allowed_headers(),
            allowed_methods: default_allowed_methods(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_body() -> usize {
    32 * 1024 * 1024
}

fn default_allowed_origin() -> String {
    "http://localhost:5173".to_string()
}

fn default_allowed_headers() -> String {
    "Content-Type,Authorization".to_string()
}

fn default_allowed_methods() -> String {
    "POST,GET,DELETE,OPTIONS,PATCH".to_string()
}
