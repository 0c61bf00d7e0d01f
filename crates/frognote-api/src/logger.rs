//! Per-day access and error log files.
//!
//! Each call opens the day's file in append mode, writes one row, and closes
//! it again. A file gets its header row when the call that creates it wins
//! the `create_new` race. Failures to write are reported through `tracing`
//! and never reach the request.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use axum::http::header::CONTENT_LENGTH;
use axum::response::Response;
use chrono::{DateTime, Local};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use frognote_core::config::LoggingConfig;

/// Header row of every access log file.
pub const ACCESS_LOG_HEADER: &str =
    "time, remoteAddr, reqUri, method, proto, status, elapsed, length, userAgent";
/// Header row of every error log file.
pub const ERROR_LOG_HEADER: &str = "time, error, additional";

/// Status, elapsed time and byte length of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseLog {
    pub status: u16,
    pub elapsed: Duration,
    pub content_length: u64,
}

impl ResponseLog {
    /// Read the metadata off a response without touching its body.
    ///
    /// The length comes from `Content-Length`, falling back to the body's
    /// exact size hint, then to zero.
    pub fn capture(response: &Response, elapsed: Duration) -> Self {
        let content_length = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .or_else(|| axum::body::HttpBody::size_hint(response.body()).exact())
            .unwrap_or(0);

        Self {
            status: response.status().as_u16(),
            elapsed,
            content_length,
        }
    }
}

/// One access log row.
#[derive(Debug, Clone)]
pub struct AccessRecord {
    pub remote_addr: String,
    pub uri: String,
    pub method: String,
    pub protocol: String,
    pub user_agent: String,
    pub response: ResponseLog,
}

/// Writes the access and error logs.
///
/// Directories are created on the first write into them.
#[derive(Debug, Clone)]
pub struct Logger {
    access_log_dir: PathBuf,
    error_log_dir: PathBuf,
}

impl Logger {
    /// Create a logger writing into the two directories.
    pub fn new(access_log_dir: impl Into<PathBuf>, error_log_dir: impl Into<PathBuf>) -> Self {
        Self {
            access_log_dir: access_log_dir.into(),
            error_log_dir: error_log_dir.into(),
        }
    }

    /// Create a logger from the `[logging]` section.
    pub fn from_config(config: &LoggingConfig) -> Self {
        Self::new(&config.access_log_dir, &config.error_log_dir)
    }

    /// Directory holding `AccessLog-*.txt`.
    pub fn access_log_dir(&self) -> &Path {
        &self.access_log_dir
    }

    /// Directory holding `ErrorLog-*.txt`.
    pub fn error_log_dir(&self) -> &Path {
        &self.error_log_dir
    }

    /// Append an error row and mirror it to the console.
    pub async fn error(&self, err: impl fmt::Display, additional: &str) {
        let now = Local::now();
        let mut row = format!("{}, {}", timestamp(&now), err);
        if !additional.is_empty() {
            row.push_str(", ");
            row.push_str(additional);
        }

        tracing::error!(error = %err, additional = %additional, "Handler error");

        let path = daily_file(&self.error_log_dir, "ErrorLog", &now);
        if let Err(e) = append_row(&path, ERROR_LOG_HEADER, &row).await {
            tracing::warn!(path = %path.display(), error = %e, "Could not write the error log");
        }
    }

    /// Append an access row.
    pub async fn access(&self, record: &AccessRecord) {
        let now = Local::now();
        let row = format!(
            "{}, {}, {}, {}, {}, {}, {}, {}, {}",
            timestamp(&now),
            record.remote_addr,
            record.uri,
            record.method,
            record.protocol,
            record.response.status,
            record.response.elapsed.as_nanos(),
            record.response.content_length,
            record.user_agent,
        );

        let path = daily_file(&self.access_log_dir, "AccessLog", &now);
        if let Err(e) = append_row(&path, ACCESS_LOG_HEADER, &row).await {
            self.error(format!("could not print the access log to file: {e}"), "")
                .await;
        }
    }
}

fn timestamp(now: &DateTime<Local>) -> String {
    now.format("[%Y-%m-%d %H:%M:%S]").to_string()
}

fn daily_file(dir: &Path, prefix: &str, now: &DateTime<Local>) -> PathBuf {
    dir.join(format!("{prefix}-{}.txt", now.format("%Y-%m-%d")))
}

async fn create_log_file(path: &Path) -> io::Result<fs::File> {
    let mut options = OpenOptions::new();
    options.append(true).create_new(true);
    match options.open(path).await {
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir).await?;
            }
            options.open(path).await
        }
        other => other,
    }
}

async fn append_row(path: &Path, header: &str, row: &str) -> io::Result<()> {
    let (mut file, text) = match create_log_file(path).await {
        Ok(file) => (file, format!("{header}\n{row}\n")),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            let file = OpenOptions::new().append(true).open(path).await?;
            (file, format!("{row}\n"))
        }
        Err(e) => return Err(e),
    };
    file.write_all(text.as_bytes()).await?;
    file.flush().await
}
