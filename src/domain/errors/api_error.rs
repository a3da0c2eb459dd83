//! Backend call error types.

use thiserror::Error;

/// Generic text shown when a request fails without a usable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred";

/// Errors raised while talking to the air-quality backend.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },

    #[error("failed to decode response: {message}")]
    Decode { message: String },

    #[error("no access token found")]
    NotAuthenticated,

    #[error("no verification token provided")]
    MissingVerificationToken,

    #[error("secure storage error: {0}")]
    Storage(#[from] super::SecretError),

    #[error("request cancelled")]
    Cancelled,

    #[error("unexpected error: {message}")]
    Unexpected { message: String },
}

impl ApiError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates status error.
    #[must_use]
    pub const fn status(status: u16, message: Option<String>) -> Self {
        Self::Status { status, message }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Text to show the user. `fallback` is used when a non-success response
    /// carried no message.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            Self::Status { .. } | Self::Decode { .. } => fallback.to_string(),
            Self::NotAuthenticated => "No access token found".to_string(),
            Self::MissingVerificationToken => "No verification token found.".to_string(),
            Self::Storage(_) => "Could not access secure storage".to_string(),
            Self::Cancelled => "Request cancelled".to_string(),
            Self::Network { .. } | Self::Unexpected { .. } => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    /// Returns the HTTP status for status errors.
    #[must_use]
    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend rejected the credential.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}
