//! User identity model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shortest display name the backend accepts on registration.
pub const NAME_MIN: usize = 2;
/// Longest display name the backend accepts on registration.
pub const NAME_MAX: usize = 255;

/// Validation errors returned by [`TelegramId::new`] and [`NewUser::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    /// Platform user identifiers are strictly positive.
    #[error("telegram id must be positive, got {id}")]
    InvalidTelegramId {
        /// The rejected raw identifier.
        id: i64,
    },
    /// Display name is shorter than [`NAME_MIN`] characters after trimming.
    #[error("name must be at least {NAME_MIN} characters")]
    NameTooShort,
    /// Display name exceeds [`NAME_MAX`] characters.
    #[error("name must be at most {NAME_MAX} characters")]
    NameTooLong,
}

/// Stable numeric identifier assigned to the user by the host chat platform.
///
/// Serialises as a bare integer (`"telegram_id": 123456789`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TelegramId(i64);

impl TelegramId {
    /// Validate and wrap a raw platform identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserValidationError::InvalidTelegramId`] for zero or
    /// negative input.
    pub const fn new(raw: i64) -> Result<Self, UserValidationError> {
        if raw <= 0 {
            return Err(UserValidationError::InvalidTelegramId { id: raw });
        }
        Ok(Self(raw))
    }

    /// The underlying numeric identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TelegramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered customer, as returned by the backend.
///
/// Created on the first registration call; `telegram_id` is immutable
/// thereafter. `phone` stays empty until the user completes registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend-assigned row identifier.
    pub id: i64,
    /// Host-platform identifier the account is keyed on.
    pub telegram_id: TelegramId,
    /// Contact phone, absent until registration supplies one.
    pub phone: Option<String>,
    /// Display name.
    pub name: String,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Registration payload for `POST /users/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    telegram_id: TelegramId,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
}

impl NewUser {
    /// Build a registration payload, enforcing the backend's name length
    /// constraints up front.
    ///
    /// # Errors
    ///
    /// Returns a [`UserValidationError`] when the trimmed name is shorter
    /// than [`NAME_MIN`] or longer than [`NAME_MAX`] characters.
    pub fn try_new(
        telegram_id: TelegramId,
        name: impl Into<String>,
        phone: Option<String>,
    ) -> Result<Self, UserValidationError> {
        let name = name.into().trim().to_owned();
        let length = name.chars().count();
        if length < NAME_MIN {
            return Err(UserValidationError::NameTooShort);
        }
        if length > NAME_MAX {
            return Err(UserValidationError::NameTooLong);
        }
        Ok(Self {
            telegram_id,
            name,
            phone,
        })
    }

    /// Identifier the account will be keyed on.
    #[must_use]
    pub const fn telegram_id(&self) -> TelegramId {
        self.telegram_id
    }

    /// Display name after trimming.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional contact phone.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::zero(0)]
    #[case::negative(-42)]
    fn rejects_non_positive_telegram_ids(#[case] raw: i64) {
        assert_eq!(
            TelegramId::new(raw),
            Err(UserValidationError::InvalidTelegramId { id: raw })
        );
    }

    #[test]
    fn accepts_positive_telegram_id() {
        let id = TelegramId::new(123_456_789).expect("positive id");
        assert_eq!(id.get(), 123_456_789);
        assert_eq!(id.to_string(), "123456789");
    }

    #[rstest]
    #[case::single_char("A", UserValidationError::NameTooShort)]
    #[case::whitespace_only("   ", UserValidationError::NameTooShort)]
    fn rejects_short_names(#[case] name: &str, #[case] expected: UserValidationError) {
        let id = TelegramId::new(1).expect("positive id");
        assert_eq!(NewUser::try_new(id, name, None), Err(expected));
    }

    #[test]
    fn rejects_overlong_name() {
        let id = TelegramId::new(1).expect("positive id");
        let name = "x".repeat(NAME_MAX + 1);
        assert_eq!(
            NewUser::try_new(id, name, None),
            Err(UserValidationError::NameTooLong)
        );
    }

    #[test]
    fn trims_name_and_serialises_without_absent_phone() {
        let id = TelegramId::new(7).expect("positive id");
        let user = NewUser::try_new(id, "  Ada Lovelace  ", None).expect("valid payload");
        assert_eq!(user.name(), "Ada Lovelace");

        let json = serde_json::to_value(&user).expect("payload serialises");
        assert_eq!(json["telegram_id"], 7);
        assert!(json.get("phone").is_none());
    }
}
