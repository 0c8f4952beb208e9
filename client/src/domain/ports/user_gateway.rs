//! Port for user lookup and registration.

use async_trait::async_trait;

use crate::domain::user::{NewUser, TelegramId, User};

use super::GatewayError;

/// Port for resolving and registering backend user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserGateway: Send + Sync {
    /// Fetch the account keyed on a platform identifier.
    ///
    /// Returns `None` when no account exists yet; callers should follow up
    /// with [`UserGateway::register`].
    async fn fetch_by_telegram_id(
        &self,
        telegram_id: TelegramId,
    ) -> Result<Option<User>, GatewayError>;

    /// Register a new account.
    async fn register(&self, user: &NewUser) -> Result<User, GatewayError>;
}
