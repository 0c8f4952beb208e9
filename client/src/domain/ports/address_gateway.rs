//! Port for saved delivery addresses.

use async_trait::async_trait;

use crate::domain::address::{Address, AddressId, NewAddress};
use crate::domain::user::TelegramId;

use super::GatewayError;

/// Port for listing, creating, and deleting a user's delivery addresses.
///
/// Addresses are never mutated in place; the only write operations are an
/// explicit create and an explicit delete.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressGateway: Send + Sync {
    /// List the user's saved addresses.
    async fn list(&self, telegram_id: TelegramId) -> Result<Vec<Address>, GatewayError>;

    /// Create an address for the user.
    ///
    /// `is_default` is the client's proposal only — `true` when the user has
    /// no prior addresses. The backend owns the at-most-one-default
    /// invariant.
    async fn create(
        &self,
        telegram_id: TelegramId,
        address: &NewAddress,
        is_default: bool,
    ) -> Result<Address, GatewayError>;

    /// Delete a saved address.
    async fn delete(&self, address_id: AddressId) -> Result<(), GatewayError>;
}
