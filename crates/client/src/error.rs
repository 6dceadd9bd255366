//! Normalized API errors
//!
//! Every failure that crosses the transport boundary is converted into an
//! [`ApiError`] exactly once, so callers never branch on reqwest-specific
//! failure types. The shape mirrors the `{status, message, data}` contract
//! the UI layers consume.

use folio_domain::FolioError;
use thiserror::Error;

/// Sentinel status for failures where no response was received.
pub const STATUS_NO_RESPONSE: u16 = 0;

/// Fallback message when the server body carries no `message` field.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Message for requests that were sent but never answered.
pub const NO_RESPONSE_MESSAGE: &str = "No response received from server";

/// Normalized error surfaced by the API client
#[derive(Debug, Error)]
pub enum ApiError {
    /// A response was received with a non-success status.
    #[error("{message} (status {status})")]
    Http {
        status: u16,
        message: String,
        /// Raw response body, when one was present.
        data: Option<serde_json::Value>,
    },

    /// The request was sent but no response arrived (network failure or
    /// timeout). The underlying transport description is kept for logs.
    #[error("{NO_RESPONSE_MESSAGE}")]
    Network(String),

    /// The request could not be constructed or sent at all.
    #[error("{0}")]
    Request(String),

    /// A token refresh failed; the local session has been cleared and the
    /// caller should redirect to a login entry point.
    #[error("Session expired, please sign in again")]
    SessionExpired,

    /// Client-side configuration problem (bad base URL, invalid settings).
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status associated with this error.
    ///
    /// [`STATUS_NO_RESPONSE`] for failures where no response was received,
    /// 401 for a terminated session.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::Http { status, .. } => *status,
            Self::SessionExpired => 401,
            Self::Network(_) | Self::Request(_) | Self::Config(_) => STATUS_NO_RESPONSE,
        }
    }

    /// Human-readable message, always non-empty.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Raw response body, when a response was received.
    #[must_use]
    pub fn data(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Http { data, .. } => data.as_ref(),
            _ => None,
        }
    }

    /// Whether this is an ordinary unauthorized response (as opposed to a
    /// terminated session).
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }

    /// Whether this error means the session has ended and the user must log
    /// in again.
    #[must_use]
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    /// Build an [`ApiError::Http`] from a status code and raw body text,
    /// extracting the server's `message` field when present.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        let data = serde_json::from_str::<serde_json::Value>(body).ok();
        let message = data
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(|m| m.as_str())
            .map_or_else(|| GENERIC_ERROR_MESSAGE.to_string(), ToString::to_string);
        let data = data.or_else(|| {
            if body.is_empty() {
                None
            } else {
                Some(serde_json::Value::String(body.to_string()))
            }
        });
        Self::Http { status, message, data }
    }
}

impl From<FolioError> for ApiError {
    fn from(err: FolioError) -> Self {
        match err {
            FolioError::Config(msg) => Self::Config(msg),
            other => Self::Request(other.to_string()),
        }
    }
}
