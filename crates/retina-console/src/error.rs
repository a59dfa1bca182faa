//! Error types for the console

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Result type alias for console operations
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Errors that can occur while serving console pages
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Backend rejected the session token (HTTP 401)
    #[error("Backend rejected the session token")]
    Unauthorized,

    /// Backend answered with a non-success status
    #[error("Backend returned {status}")]
    Backend {
        /// HTTP status from the backend
        status: StatusCode,
        /// Message extracted from the response body, if any
        message: Option<String>,
    },

    /// Backend could not be reached
    #[error("Failed to reach backend: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend response body did not match the expected shape
    #[error("Failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Page template failed to render
    #[error("Failed to render page: {0}")]
    Template(#[from] askama::Error),

    /// Core error
    #[error(transparent)]
    Core(#[from] retina_core::Error),
}

impl ConsoleError {
    /// Whether the session must be invalidated
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Message for the operator: the server's own message when one was sent, else `fallback`
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Backend {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Core(retina_core::Error::Validation { message, .. }) => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Best-effort extraction of a human readable message from an error body
#[must_use]
pub fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error", "title", "detail"]
        .iter()
        .find_map(|key| {
            value
                .get(key)
                .and_then(serde_json::Value::as_str)
                .map(str::trim)
                .filter(|text| !text.is_empty())
        })
        .map(ToOwned::to_owned)
}

impl IntoResponse for ConsoleError {
    fn into_response(self) -> Response {
        error!("Console request failed: {}", self);
        let status = match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Backend { .. } | Self::Transport(_) | Self::Decode(_) => StatusCode::BAD_GATEWAY,
            Self::Template(_) | Self::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, "The console could not complete the request").into_response()
    }
}
