//! Shared error type for gateway adapters.

use thiserror::Error;

/// Errors surfaced by gateway adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Connection-level failure or an unexpected server-side error.
    #[error("gateway transport failed: {message}")]
    Transport {
        /// Adapter-provided failure description.
        message: String,
    },
    /// The request did not complete within the configured deadline.
    #[error("gateway request timed out: {message}")]
    Timeout {
        /// Adapter-provided failure description.
        message: String,
    },
    /// The response body could not be decoded into the expected shape.
    #[error("gateway response decode failed: {message}")]
    Decode {
        /// Adapter-provided failure description.
        message: String,
    },
    /// The backend rejected the request and supplied a user-facing reason,
    /// e.g. a district at its daily capacity.
    #[error("request rejected: {message}")]
    Rejected {
        /// Backend-provided rejection reason.
        message: String,
    },
    /// The addressed resource does not exist.
    #[error("resource not found: {message}")]
    NotFound {
        /// Adapter-provided description.
        message: String,
    },
}

impl GatewayError {
    /// Helper for transport-level failures.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Helper for timed-out requests.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Helper for undecodable responses.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Helper for backend rejections.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Helper for missing resources.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// The backend-provided reason, when the failure carries one suitable
    /// for showing to the user.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message } => Some(message),
            _ => None,
        }
    }
}
