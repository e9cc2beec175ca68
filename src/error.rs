//! Relay error taxonomy and its HTTP mapping.
//!
//! Every variant renders as `{"detail": ...}`. None of them carries the
//! upstream key.

use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

use crate::conversion::ReplyError;

#[derive(Debug, Error)]
pub enum RelayError {
    /// The server holds no upstream key; nothing was sent upstream.
    #[error("Upstream API key not configured on the server")]
    MissingApiKey,

    /// Connection failure, timeout, or a broken body read.
    #[error("Error calling upstream: {0}")]
    Transport(String),

    /// Upstream answered with a 4xx/5xx status.
    #[error("Upstream returned status {status}")]
    UpstreamStatus { status: u16, body: Value },

    /// Upstream succeeded but the body did not have the expected shape.
    #[error("Could not parse upstream response: {0}")]
    Parse(#[from] ReplyError),

    /// The inbound body could not be decoded into a chat request.
    #[error("{message}")]
    InvalidRequest { status: StatusCode, message: String },
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Transport(_)
            | RelayError::UpstreamStatus { .. }
            | RelayError::Parse(_) => StatusCode::BAD_GATEWAY,
            RelayError::InvalidRequest { status, .. } => *status,
        }
    }

    /// The `detail` value returned to the client.
    pub fn detail(&self) -> Value {
        match self {
            RelayError::UpstreamStatus { status, body } => json!({
                "upstream_status": status,
                "upstream_response": body,
            }),
            other => Value::String(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        // Strip the URL so query-string credentials of custom endpoints never leak.
        RelayError::Transport(e.without_url().to_string())
    }
}

impl From<axum::extract::rejection::JsonRejection> for RelayError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        RelayError::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.detail() }))).into_response()
    }
}
