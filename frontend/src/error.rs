//! Request error type shared by every API call.
//!
//! Every failure a screen can see is one of two things: the request never
//! completed, or the server answered with a non-success status. Server
//! messages are normalized out of the `{ "errors": { "message": … } }`
//! envelope before they get here; anything undecodable falls back to
//! [`REQUEST_FAILED`].

use std::fmt;

/// Fallback message when a failure response carries no decodable envelope.
pub const REQUEST_FAILED: &str = "Request failed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Transport-level failure: fetch rejected, connection refused, CORS.
    Network(String),
    /// Completed round-trip with a non-2xx status.
    Http { status: u16, message: String },
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        ApiError::Network(message.into())
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        ApiError::Http {
            status,
            message: message.into(),
        }
    }

    /// The HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Network(_) => None,
            ApiError::Http { status, .. } => Some(*status),
        }
    }

    /// The user-facing message, already normalized for display.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Network(message) => message,
            ApiError::Http { message, .. } => message,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(message) => write!(f, "[network] {}", message),
            ApiError::Http { status, message } => write!(f, "[{}] {}", status, message),
        }
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
