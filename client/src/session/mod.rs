//! Host-platform session resolution.
//!
//! The chat platform hands the embedded app an `initData` payload: URL-encoded
//! key/value pairs in which the `user` value is a JSON object describing the
//! caller. [`Session::from_init_data`] resolves that payload once, at process
//! start, into an explicit [`Session`] value that is then injected by
//! reference into every component needing the user identifier — components
//! never re-read ambient host state.
//!
//! The host bridge's lifecycle hooks (`ready`, `expand`) are the embedding
//! shell's concern and carry no contract relevant to this core.

use serde::Deserialize;
use thiserror::Error;

use crate::domain::user::{TelegramId, UserValidationError};

/// Errors raised while resolving the host session payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The payload carries no `user` entry.
    #[error("init data carries no user entry")]
    MissingUser,
    /// The `user` entry is not the expected JSON object.
    #[error("init data user entry is malformed: {message}")]
    InvalidUserPayload {
        /// Decoder failure description.
        message: String,
    },
    /// The platform identifier fails validation.
    #[error("init data user id is invalid: {source}")]
    InvalidUserId {
        /// The underlying validation failure.
        #[from]
        source: UserValidationError,
    },
}

/// JSON shape of the `user` entry inside the init data payload.
#[derive(Debug, Deserialize)]
struct InitDataUser {
    id: i64,
    first_name: String,
    last_name: Option<String>,
    username: Option<String>,
}

/// The caller's resolved identity for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    telegram_id: TelegramId,
    full_name: String,
    username: Option<String>,
}

impl Session {
    /// Assemble a session from already-resolved parts.
    pub fn new(
        telegram_id: TelegramId,
        full_name: impl Into<String>,
        username: Option<String>,
    ) -> Self {
        Self {
            telegram_id,
            full_name: full_name.into(),
            username,
        }
    }

    /// Resolve the host platform's `initData` payload.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] when the payload carries no `user` entry,
    /// when that entry is not valid JSON of the expected shape, or when the
    /// embedded identifier is not a positive integer.
    pub fn from_init_data(init_data: &str) -> Result<Self, SessionError> {
        let user_json = url::form_urlencoded::parse(init_data.as_bytes())
            .find(|(key, _)| key == "user")
            .map(|(_, value)| value.into_owned())
            .ok_or(SessionError::MissingUser)?;

        let user: InitDataUser = serde_json::from_str(&user_json).map_err(|error| {
            SessionError::InvalidUserPayload {
                message: error.to_string(),
            }
        })?;

        let telegram_id = TelegramId::new(user.id)?;
        let full_name = match user.last_name.as_deref() {
            Some(last) if !last.is_empty() => format!("{} {last}", user.first_name),
            _ => user.first_name,
        };

        Ok(Self {
            telegram_id,
            full_name,
            username: user.username,
        })
    }

    /// The caller's stable platform identifier.
    #[must_use]
    pub const fn telegram_id(&self) -> TelegramId {
        self.telegram_id
    }

    /// First name plus last name when the platform supplied one.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Platform username, when the caller has one.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }
}
