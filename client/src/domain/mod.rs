//! Domain entities, workflow services, and driven ports.
//!
//! Purpose: define the strongly typed aggregates exchanged with the backend
//! API and the two pieces of client-side logic worth guarding with
//! invariants — the order draft controller and the order status projector.
//! Types are wire-shaped (serde contracts documented per type); mutation
//! happens only inside the draft controller, everything else is read-only
//! reference data fetched through the ports.

pub mod address;
pub mod district;
pub mod draft;
pub mod onboarding;
pub mod order;
pub mod ports;
pub mod status;
pub mod user;

pub use self::address::{Address, AddressId, AddressValidationError, NewAddress};
pub use self::district::District;
pub use self::draft::{DraftError, DraftStep, OrderDraftController, QuantityKind};
pub use self::onboarding::{OnboardingError, resolve_or_register};
pub use self::order::{NewOrder, Order, OrderStatus, OrderUpdate, OrderValidationError};
pub use self::status::{ProgressStep, project, project_order, track_position};
pub use self::user::{NewUser, TelegramId, User, UserValidationError};
