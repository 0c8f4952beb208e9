//! First-contact account resolution.
//!
//! A user account is created on the first registration call and keyed on
//! the platform identifier forever after. This service resolves the
//! caller's account, registering one from the session identity when none
//! exists yet.

use thiserror::Error;

use crate::session::Session;

use super::ports::{GatewayError, UserGateway};
use super::user::{NewUser, User, UserValidationError};

/// Failures surfaced while resolving or registering the account.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OnboardingError {
    /// The session's display name does not satisfy registration constraints.
    #[error("session identity is not registrable: {source}")]
    InvalidIdentity {
        /// The underlying validation failure.
        #[from]
        source: UserValidationError,
    },
    /// A gateway call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Fetch the account for the session's platform identifier, registering a
/// new one from the session identity when none exists.
///
/// `phone` is forwarded on registration only; an existing account is
/// returned as-is.
///
/// # Errors
///
/// Returns [`OnboardingError::InvalidIdentity`] when a registration would
/// be needed but the session's name fails validation, and
/// [`OnboardingError::Gateway`] when either gateway call fails.
pub async fn resolve_or_register<G: UserGateway + ?Sized>(
    session: &Session,
    gateway: &G,
    phone: Option<String>,
) -> Result<User, OnboardingError> {
    if let Some(user) = gateway.fetch_by_telegram_id(session.telegram_id()).await? {
        return Ok(user);
    }

    tracing::debug!(telegram_id = %session.telegram_id(), "registering first-time user");
    let registration = NewUser::try_new(session.telegram_id(), session.full_name(), phone)?;
    Ok(gateway.register(&registration).await?)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::domain::ports::MockUserGateway;
    use crate::domain::user::TelegramId;

    use super::*;

    fn session() -> Session {
        Session::new(TelegramId::new(42).expect("positive id"), "Ada Lovelace", None)
    }

    fn user(name: &str) -> User {
        User {
            id: 1,
            telegram_id: TelegramId::new(42).expect("positive id"),
            phone: None,
            name: name.to_owned(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn returns_the_existing_account_without_registering() {
        let mut gateway = MockUserGateway::new();
        gateway
            .expect_fetch_by_telegram_id()
            .times(1)
            .return_once(|_| Ok(Some(user("Ada Lovelace"))));
        // No register expectation: a call would panic.

        let resolved = resolve_or_register(&session(), &gateway, None)
            .await
            .expect("existing account resolves");
        assert_eq!(resolved.name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn registers_from_the_session_identity_when_absent() {
        let mut gateway = MockUserGateway::new();
        gateway
            .expect_fetch_by_telegram_id()
            .times(1)
            .return_once(|_| Ok(None));
        gateway
            .expect_register()
            .times(1)
            .withf(|registration| {
                registration.name() == "Ada Lovelace"
                    && registration.phone() == Some("+10000000001")
            })
            .return_once(|registration| Ok(user(registration.name())));

        let resolved =
            resolve_or_register(&session(), &gateway, Some("+10000000001".to_owned()))
                .await
                .expect("registration succeeds");
        assert_eq!(resolved.telegram_id.get(), 42);
    }

    #[tokio::test]
    async fn propagates_gateway_failures() {
        let mut gateway = MockUserGateway::new();
        gateway
            .expect_fetch_by_telegram_id()
            .times(1)
            .return_once(|_| Err(GatewayError::transport("connection refused")));

        let error = resolve_or_register(&session(), &gateway, None)
            .await
            .expect_err("lookup failed");
        assert!(matches!(error, OnboardingError::Gateway(_)));
    }

    #[tokio::test]
    async fn rejects_an_unregistrable_session_name() {
        let mut gateway = MockUserGateway::new();
        gateway
            .expect_fetch_by_telegram_id()
            .times(1)
            .return_once(|_| Ok(None));
        let session = Session::new(TelegramId::new(42).expect("positive id"), "A", None);

        let error = resolve_or_register(&session, &gateway, None)
            .await
            .expect_err("single-character name");
        assert!(matches!(error, OnboardingError::InvalidIdentity { .. }));
    }
}
