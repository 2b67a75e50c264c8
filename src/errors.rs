use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::fmt;

pub const INVALID_ID_MESSAGE: &str = "Invalid or missing id (should be a number)";
pub const INVALID_LAYOUT_MESSAGE: &str = "Invalid layout (expected full or compact)";
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to fetch HTB profile";
pub const PROFILE_NOT_FOUND_MESSAGE: &str = "Profile not found";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Application-specific error types.
#[derive(Debug, Clone)]
pub enum AppError {
    /// The `id` query parameter is missing or not made of digits.
    InvalidInput(String),
    /// The `layout` query parameter names an unknown layout.
    InvalidLayout(String),
    /// The profile provider answered with a non-success status.
    Upstream {
        /// Status code returned by the provider.
        status: u16,
    },
    /// The provider could not be reached at all.
    UpstreamUnavailable(String),
    /// The provider did not answer before the configured deadline.
    UpstreamTimeout,
    /// The provider answered, but with a null or missing `profile`.
    ProfileNotFound,
    /// The provider body was not the JSON we expect.
    Parse(String),
    /// Internal server error.
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::InvalidLayout(value) => write!(f, "Invalid layout: {}", value),
            AppError::Upstream { status } => write!(f, "HTB API returned status {}", status),
            AppError::UpstreamUnavailable(msg) => write!(f, "HTB API unreachable: {}", msg),
            AppError::UpstreamTimeout => write!(f, "HTB API request timed out"),
            AppError::ProfileNotFound => write!(f, "Profile not found"),
            AppError::Parse(msg) => write!(f, "Failed to parse HTB response: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Status code and caller-facing message for this error.
    ///
    /// Parse and internal failures share the generic 500 body so upstream
    /// payloads and client internals never reach the caller.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InvalidLayout(_) => {
                (StatusCode::BAD_REQUEST, INVALID_LAYOUT_MESSAGE.to_string())
            }
            AppError::Upstream { status } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                UPSTREAM_FAILURE_MESSAGE.to_string(),
            ),
            AppError::UpstreamUnavailable(_) => {
                (StatusCode::BAD_GATEWAY, UPSTREAM_FAILURE_MESSAGE.to_string())
            }
            AppError::UpstreamTimeout => (
                StatusCode::GATEWAY_TIMEOUT,
                UPSTREAM_FAILURE_MESSAGE.to_string(),
            ),
            AppError::ProfileNotFound => {
                (StatusCode::NOT_FOUND, PROFILE_NOT_FOUND_MESSAGE.to_string())
            }
            AppError::Parse(_) | AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_MESSAGE.to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    /// Converts the error into a plain-text HTTP response.
    ///
    /// Logs errors according to their severity.
    fn into_response(self) -> Response {
        match &self {
            AppError::InvalidInput(_) | AppError::InvalidLayout(_) => {
                tracing::warn!("Rejected request: {}", self);
            }
            AppError::Upstream { .. } => tracing::warn!("{}", self),
            AppError::ProfileNotFound => tracing::info!("{}", self),
            AppError::UpstreamUnavailable(_)
            | AppError::UpstreamTimeout
            | AppError::Parse(_)
            | AppError::Internal(_) => tracing::error!("{}", self),
        }

        let (status, message) = self.status_and_message();

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            message,
        )
            .into_response()
    }
}

impl From<reqwest::Error> for AppError {
    /// Classifies a `reqwest::Error` by what went wrong on the wire.
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::UpstreamTimeout
        } else if err.is_decode() {
            AppError::Parse(err.to_string())
        } else {
            AppError::UpstreamUnavailable(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(err.to_string())
    }
}
