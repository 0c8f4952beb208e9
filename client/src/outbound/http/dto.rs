//! Transport DTOs for payloads whose wire shape differs from the domain.
//!
//! Most entities decode straight into domain types; this module covers the
//! exceptions: the address-create body (which carries the controller-decided
//! `is_default` flag alongside the validated form), the order-history
//! envelope, and the backend's error body.

use pagination::Page;
use serde::{Deserialize, Serialize};

use crate::domain::address::NewAddress;
use crate::domain::order::Order;

/// Request body for `POST /addresses/user/{telegram_id}`.
#[derive(Debug, Serialize)]
pub(super) struct CreateAddressDto<'a> {
    city: &'a str,
    district: &'a str,
    street: &'a str,
    house: &'a str,
    is_default: bool,
}

impl<'a> CreateAddressDto<'a> {
    pub(super) fn from_form(form: &'a NewAddress, is_default: bool) -> Self {
        Self {
            city: form.city(),
            district: form.district(),
            street: form.street(),
            house: form.house(),
            is_default,
        }
    }
}

/// Response envelope for `GET /orders/user/{telegram_id}`.
#[derive(Debug, Deserialize)]
pub(super) struct OrderListDto {
    #[serde(default)]
    orders: Vec<Order>,
    total: u64,
}

impl OrderListDto {
    pub(super) fn into_page(self) -> Page<Order> {
        Page::new(self.orders, self.total)
    }
}

/// Error body the backend attaches to non-success responses.
///
/// `detail` is usually a string, but request-validation failures carry a
/// structured list; both forms are reduced to one displayable message.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBodyDto {
    detail: serde_json::Value,
}

impl ErrorBodyDto {
    pub(super) fn message(self) -> String {
        match self.detail {
            serde_json::Value::String(message) => message,
            other => other.to_string(),
        }
    }
}
