//! Handler replies and the mapping from `AppError` to HTTP status.

use axum::body::Body;
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde::Serialize;

use frognote_core::error::{AppError, ErrorKind};

/// Status and body produced by a business handler.
///
/// Failure bodies are short fixed strings. Internal error text never
/// reaches the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// HTTP status code.
    pub status: StatusCode,
    /// Optional `Content-Type`.
    pub content_type: Option<&'static str>,
    /// Response body.
    pub body: Bytes,
}

impl Reply {
    /// A reply with a plain body and no content type.
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            content_type: None,
            body: body.into(),
        }
    }

    /// `200 OK` with an empty body.
    pub fn empty() -> Self {
        Self::new(StatusCode::OK, Bytes::new())
    }

    /// `200 OK` with a text body.
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: Some("text/plain; charset=utf-8"),
            body: Bytes::from(body.into()),
        }
    }

    /// `200 OK` with raw bytes.
    pub fn binary(body: impl Into<Bytes>) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: Some("application/octet-stream"),
            body: body.into(),
        }
    }

    /// `200 OK` with a JSON body.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, AppError> {
        let body = serde_json::to_vec(value)?;
        Ok(Self {
            status: StatusCode::OK,
            content_type: Some("application/json"),
            body: Bytes::from(body),
        })
    }

    /// Map an error to its status and public message.
    pub fn from_error(err: &AppError) -> Self {
        let (status, message) = match err.kind {
            ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "Bad request"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "Not found"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "Conflict"),
            ErrorKind::Serialization => (StatusCode::INTERNAL_SERVER_ERROR, "Could not parse json"),
            ErrorKind::Internal
            | ErrorKind::Database
            | ErrorKind::Storage
            | ErrorKind::Configuration => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };
        Self::new(status, message)
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        let length = self.body.len();
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        let headers = response.headers_mut();
        headers.insert(CONTENT_LENGTH, HeaderValue::from(length));
        if let Some(content_type) = self.content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        response
    }
}
