//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Logging and tracing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: `"trace"`, `"debug"`, `"info"`, `"warn"`, `"error"`.
    #[serde(default = "default_level")]
    pub level: String,
    /// Log format: `"json"` or `"pretty"`.
    #[serde(default = "default_format")]
    pub format: String,
    /// Directory holding the per-day access log files.
    #[serde(default = "default_access_log_dir")]
    pub access_log_dir: String,
    /// Directory holding the per-day error log files.
    #[serde(default = "default_error_log_dir")]
    pub error_log_dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            access_log_dir: default_access_log_dir(),
            error_log_dir: default_error_log_dir(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

fn default_access_log_dir() -> String {
    "AccessLogs".to_string()
}

fn default_error_log_dir() -> String {
    "ErrorLogs".to_string()
}
