//! Port for order submission and retrieval.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::order::{NewOrder, Order, OrderUpdate};
use crate::domain::user::TelegramId;

use super::GatewayError;

/// Port for submitting orders and reading a user's order history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Submit a validated order. The backend assigns the delivery date and
    /// may reject the request, e.g. when the district is at its daily
    /// capacity; rejections carry the server's reason in
    /// [`GatewayError::Rejected`].
    async fn create(
        &self,
        telegram_id: TelegramId,
        order: &NewOrder,
    ) -> Result<Order, GatewayError>;

    /// Fetch one page of the user's order history, newest first.
    async fn history(
        &self,
        telegram_id: TelegramId,
        page: PageRequest,
    ) -> Result<Page<Order>, GatewayError>;

    /// Fetch the user's current non-terminal order, if any.
    async fn active(&self, telegram_id: TelegramId) -> Result<Option<Order>, GatewayError>;

    /// Fetch the user's most recently completed order, if any.
    async fn last_completed(
        &self,
        telegram_id: TelegramId,
    ) -> Result<Option<Order>, GatewayError>;

    /// Partially update an order; absent fields are left untouched.
    async fn update(&self, order_id: i64, update: &OrderUpdate) -> Result<Order, GatewayError>;
}
