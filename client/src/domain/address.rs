//! Delivery address model.
//!
//! Addresses belong to exactly one user and are never mutated in place:
//! they are created through an explicit add action and removed through an
//! explicit delete. At most one address per user carries `is_default`; the
//! backend enforces that invariant, the client merely proposes
//! `is_default = true` for a user's first address.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest accepted city or district value.
pub const CITY_MAX: usize = 100;
/// Longest accepted street value.
pub const STREET_MAX: usize = 255;
/// Longest accepted house/unit value.
pub const HOUSE_MAX: usize = 50;

/// Validation errors returned by [`NewAddress::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressValidationError {
    /// A required field is empty after trimming.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A field exceeds the backend's length cap.
    #[error("{field} must be at most {max} characters")]
    FieldTooLong {
        /// Name of the offending field.
        field: &'static str,
        /// The cap that was exceeded.
        max: usize,
    },
}

/// Backend-assigned address identifier.
///
/// Serialises as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressId(i64);

impl AddressId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The underlying numeric identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AddressId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A saved delivery address, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Backend-assigned identifier.
    pub id: AddressId,
    /// Owning user's backend row identifier.
    pub user_id: i64,
    /// City.
    pub city: String,
    /// Delivery district; matches a known [`super::District`] name.
    pub district: String,
    /// Street.
    pub street: String,
    /// House and unit.
    pub house: String,
    /// Whether this is the user's default delivery address.
    pub is_default: bool,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Validated new-address form: the four user-entered fields, trimmed.
///
/// Whether the created address becomes the default is decided by the draft
/// controller from the user's current address count, not by this form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    city: String,
    district: String,
    street: String,
    house: String,
}

impl NewAddress {
    /// Validate the four form fields: each must be non-empty after trimming
    /// and within the backend's length caps.
    ///
    /// # Errors
    ///
    /// Returns the first [`AddressValidationError`] encountered, checking
    /// fields in form order (city, district, street, house).
    pub fn try_new(
        city: impl Into<String>,
        district: impl Into<String>,
        street: impl Into<String>,
        house: impl Into<String>,
    ) -> Result<Self, AddressValidationError> {
        Ok(Self {
            city: validate_field("city", city.into(), CITY_MAX)?,
            district: validate_field("district", district.into(), CITY_MAX)?,
            street: validate_field("street", street.into(), STREET_MAX)?,
            house: validate_field("house", house.into(), HOUSE_MAX)?,
        })
    }

    /// City, trimmed.
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// District name, trimmed.
    #[must_use]
    pub fn district(&self) -> &str {
        &self.district
    }

    /// Street, trimmed.
    #[must_use]
    pub fn street(&self) -> &str {
        &self.street
    }

    /// House and unit, trimmed.
    #[must_use]
    pub fn house(&self) -> &str {
        &self.house
    }
}

fn validate_field(
    field: &'static str,
    value: String,
    max: usize,
) -> Result<String, AddressValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AddressValidationError::EmptyField { field });
    }
    if trimmed.chars().count() > max {
        return Err(AddressValidationError::FieldTooLong { field, max });
    }
    Ok(trimmed.to_owned())
}
