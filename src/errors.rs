//! Error types for the fiberpay-rs library.
//!
//! Every failure surfaces directly to the caller; nothing is retried internally.

use crate::types::HttpMethod;
use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for FiberPay API calls.
#[derive(Error, Debug)]
pub enum FiberPayError {
    /// Connection, TLS or I/O failure while talking to the API
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API rejected the credentials or the request signature (401/403)
    #[error("Unauthorized ({status}): {body}")]
    Unauthorized {
        /// HTTP status returned by the API
        status: StatusCode,
        /// Raw response body
        body: String,
    },

    /// Any other non-success HTTP status
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status returned by the API
        status: StatusCode,
        /// Raw response body
        body: String,
    },

    /// GET and PUT requests are sent without a body
    #[error("{0} requests cannot carry a body")]
    BodyNotAllowed(HttpMethod),

    /// Error during JSON serialization of a request body
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid base URL
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl FiberPayError {
    /// Builds the error for a non-success status, keeping authentication
    /// failures distinguishable from other API errors.
    pub(crate) fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                FiberPayError::Unauthorized { status, body }
            }
            _ => FiberPayError::Api { status, body },
        }
    }

    /// Returns true when the API rejected the credentials or signature.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, FiberPayError::Unauthorized { .. })
    }

    /// HTTP status attached to the error, if the request reached the API.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FiberPayError::Unauthorized { status, .. } | FiberPayError::Api { status, .. } => {
                Some(*status)
            }
            FiberPayError::Transport(err) => err.status(),
            _ => None,
        }
    }
}

/// Result type alias for FiberPay operations.
pub type Result<T> = std::result::Result<T, FiberPayError>;
