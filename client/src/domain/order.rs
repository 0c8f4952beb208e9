//! Order model and submission payloads.
//!
//! `jv_qty` counts potable-water containers, `lv_qty` treatment-water
//! containers. `total_qty` is computed server-side and trusted as given.
//! An order is only submittable when `jv_qty + lv_qty >= 1`; [`NewOrder`]
//! makes that invariant unrepresentable on the request path, the backend
//! re-validates it as the authority.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::address::AddressId;

/// Order lifecycle status, snake_case on the wire.
///
/// `Cancelled`, `PaymentPending`, and `Paid` are side-channel states that
/// never appear on the linear progress timeline (see [`super::status`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Composed but not yet submitted; never reached through this client.
    Draft,
    /// Accepted by the backend, awaiting operator confirmation.
    New,
    /// Confirmed by an operator.
    Confirmed,
    /// Pushed back to a later delivery date; recoverable, the timeline
    /// still reads as confirmed.
    Rescheduled,
    /// Out for delivery.
    InDelivery,
    /// Delivered.
    Completed,
    /// Cancelled by the user or an operator.
    Cancelled,
    /// Awaiting payment.
    PaymentPending,
    /// Paid.
    Paid,
}

impl OrderStatus {
    /// Wire representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::New => "new",
            Self::Confirmed => "confirmed",
            Self::Rescheduled => "rescheduled",
            Self::InDelivery => "in_delivery",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::PaymentPending => "payment_pending",
            Self::Paid => "paid",
        }
    }

    /// Badge label shown to the user.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Черновик",
            Self::New => "Новый",
            Self::Confirmed => "Подтверждён",
            Self::Rescheduled => "Перенесён",
            Self::InDelivery => "В доставке",
            Self::Completed => "Выполнен",
            Self::Cancelled => "Отменён",
            Self::PaymentPending => "Ожидание оплаты",
            Self::Paid => "Оплачен",
        }
    }

    /// Whether the order can no longer become active again.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Paid)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A placed order, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Backend-assigned identifier.
    pub id: i64,
    /// Owning user's backend row identifier.
    pub user_id: i64,
    /// Delivery address; may be absent on historical rows whose address was
    /// deleted.
    pub address_id: Option<AddressId>,
    /// Potable-water container count.
    pub jv_qty: u32,
    /// Treatment-water container count.
    pub lv_qty: u32,
    /// Server-computed total, equal to `jv_qty + lv_qty`.
    pub total_qty: u32,
    /// Server-assigned delivery date, absent until assignment.
    pub delivery_date: Option<NaiveDate>,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Free-text customer comment.
    pub comment: Option<String>,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
    /// When an operator confirmed the order, absent until confirmation.
    pub confirmed_at: Option<DateTime<Utc>>,
    /// Operator handling the order, absent until assignment.
    pub operator_id: Option<i64>,
}

/// Validation errors returned by [`NewOrder::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderValidationError {
    /// Both quantities are zero.
    #[error("общее количество (ЖВ + ЛВ) должно быть ≥ 1")]
    EmptyOrder,
}

/// Validated submission payload for `POST /orders/user/{telegram_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewOrder {
    address_id: AddressId,
    jv_qty: u32,
    lv_qty: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
}

impl NewOrder {
    /// Build a submission payload, enforcing the minimum-quantity invariant.
    ///
    /// # Errors
    ///
    /// Returns [`OrderValidationError::EmptyOrder`] when both quantities are
    /// zero.
    pub fn try_new(
        address_id: AddressId,
        jv_qty: u32,
        lv_qty: u32,
        comment: Option<String>,
    ) -> Result<Self, OrderValidationError> {
        if jv_qty == 0 && lv_qty == 0 {
            return Err(OrderValidationError::EmptyOrder);
        }
        Ok(Self {
            address_id,
            jv_qty,
            lv_qty,
            comment,
        })
    }

    /// Selected delivery address.
    #[must_use]
    pub const fn address_id(&self) -> AddressId {
        self.address_id
    }

    /// Potable-water container count.
    #[must_use]
    pub const fn jv_qty(&self) -> u32 {
        self.jv_qty
    }

    /// Treatment-water container count.
    #[must_use]
    pub const fn lv_qty(&self) -> u32 {
        self.lv_qty
    }

    /// Optional customer comment.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

/// Partial-update payload for `PATCH /orders/{order_id}`.
///
/// Absent fields are omitted from the request body and left untouched by the
/// backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderUpdate {
    /// Replacement potable-water count, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jv_qty: Option<u32>,
    /// Replacement treatment-water count, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lv_qty: Option<u32>,
    /// Replacement comment, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}
