//! Three-step order draft workflow.
//!
//! [`OrderDraftController`] owns the transient draft state for one pass
//! through the order-creation flow: address selection, quantity entry, and
//! confirmation. It is constructed when the workflow view is entered and
//! dropped when the view is exited, so no gateway callback can outlive the
//! draft it belongs to. All operations take `&mut self`, which serialises
//! user events and rules out duplicate in-flight submissions without any
//! locking.
//!
//! Network calls happen only in [`OrderDraftController::add_new_address`]
//! and [`OrderDraftController::submit`]; every other transition is purely
//! in-memory and synchronous.

use std::sync::Arc;

use thiserror::Error;

use crate::session::Session;

use super::address::{Address, AddressId, NewAddress};
use super::district::District;
use super::order::{NewOrder, Order};
use super::ports::{AddressGateway, CatalogueGateway, OrderGateway};

/// Inline message when the address form has a missing or overlong field.
const FILL_ADDRESS_FIELDS: &str = "Заполните все поля адреса";
/// Inline message when address creation fails at the gateway.
const ADDRESS_CREATE_FAILED: &str = "Ошибка добавления адреса";
/// Inline message when the draft holds no containers at all.
const MIN_QUANTITY_REQUIRED: &str = "Укажите хотя бы 1 бутыль";
/// Inline message when submission is attempted without a selected address.
const ADDRESS_REQUIRED: &str = "Выберите адрес доставки";
/// Fallback message when order creation fails without a server reason.
const ORDER_CREATE_FAILED: &str = "Ошибка создания заказа";

/// The step the draft workflow currently sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftStep {
    /// Choosing an existing address or filling the new-address form.
    Address,
    /// Entering container quantities and an optional comment.
    Qty,
    /// Reviewing the draft before submission.
    Confirm,
}

/// Which quantity a `+`/`-` control adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityKind {
    /// Potable water.
    Jv,
    /// Treatment water.
    Lv,
}

/// Failures surfaced by draft operations.
///
/// Every failure is local to the current step: the controller records the
/// user-facing message in [`OrderDraftController::last_error`] and the
/// caller may retry the same action indefinitely.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    /// A locally detected precondition violation; no network call was made.
    #[error("{message}")]
    Validation {
        /// User-facing message.
        message: String,
    },
    /// The gateway rejected the request or failed to complete it.
    #[error("{message}")]
    Gateway {
        /// User-facing message, server-provided when available.
        message: String,
    },
}

/// Drives the order-creation workflow and guarantees that only a
/// structurally valid request reaches the order gateway.
pub struct OrderDraftController<A, O> {
    session: Session,
    address_gateway: Arc<A>,
    order_gateway: Arc<O>,
    step: DraftStep,
    addresses: Vec<Address>,
    districts: Vec<District>,
    selected_address: Option<AddressId>,
    jv_qty: u32,
    lv_qty: u32,
    comment: String,
    last_error: Option<String>,
    completed: bool,
}

impl<A, O> OrderDraftController<A, O>
where
    A: AddressGateway,
    O: OrderGateway,
{
    /// Enter the workflow: load the user's addresses and the district list,
    /// then start at the address step.
    ///
    /// The catalogue gateway is only needed for this initial read, so it is
    /// borrowed rather than kept. Either read failing degrades to an empty
    /// list after logging the error; the user can still add a new address
    /// and proceed, and the backend remains the authority on district
    /// membership.
    pub async fn start<C: CatalogueGateway + ?Sized>(
        session: Session,
        address_gateway: Arc<A>,
        catalogue_gateway: &C,
        order_gateway: Arc<O>,
    ) -> Self {
        let addresses = match address_gateway.list(session.telegram_id()).await {
            Ok(addresses) => addresses,
            Err(error) => {
                tracing::warn!(%error, "address list fetch failed, starting with none");
                Vec::new()
            }
        };
        let districts = match catalogue_gateway.districts().await {
            Ok(districts) => districts,
            Err(error) => {
                tracing::warn!(%error, "district fetch failed, starting with none");
                Vec::new()
            }
        };

        Self {
            session,
            address_gateway,
            order_gateway,
            step: DraftStep::Address,
            addresses,
            districts,
            selected_address: None,
            jv_qty: 0,
            lv_qty: 0,
            comment: String::new(),
            last_error: None,
            completed: false,
        }
    }

    /// Current workflow step.
    #[must_use]
    pub const fn step(&self) -> DraftStep {
        self.step
    }

    /// Addresses loaded for selection, including any created mid-workflow.
    #[must_use]
    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    /// Districts available for the new-address form.
    #[must_use]
    pub fn districts(&self) -> &[District] {
        &self.districts
    }

    /// Currently selected delivery address, if any.
    #[must_use]
    pub const fn selected_address(&self) -> Option<AddressId> {
        self.selected_address
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

    /// Combined container count, saturating at `u32::MAX` since each
    /// quantity saturates independently.
    #[must_use]
    pub const fn total_qty(&self) -> u32 {
        self.jv_qty.saturating_add(self.lv_qty)
    }

    /// Customer comment entered so far.
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Replace the customer comment.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    /// Message describing the most recent failed operation, cleared by the
    /// next successful transition.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether a submission has succeeded; the controller should be dropped
    /// once this turns true.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Select an already-loaded address and advance to the quantity step.
    ///
    /// A no-op when `id` is not among the loaded addresses.
    pub fn select_address(&mut self, id: AddressId) {
        if self.addresses.iter().any(|address| address.id == id) {
            self.selected_address = Some(id);
            self.step = DraftStep::Qty;
            self.last_error = None;
        }
    }

    /// Validate the new-address form, create the address, select it, and
    /// advance to the quantity step.
    ///
    /// The created address is proposed as the default only when the user
    /// had no addresses loaded. On a gateway failure the workflow stays at
    /// the address step with a fixed inline message.
    ///
    /// # Errors
    ///
    /// [`DraftError::Validation`] when a form field is empty or overlong
    /// (no network call is made); [`DraftError::Gateway`] when creation
    /// fails at the backend.
    pub async fn add_new_address(
        &mut self,
        city: &str,
        district: &str,
        street: &str,
        house: &str,
    ) -> Result<AddressId, DraftError> {
        let form = match NewAddress::try_new(city, district, street, house) {
            Ok(form) => form,
            Err(error) => {
                tracing::debug!(%error, "new-address form rejected");
                return self.validation_failure(FILL_ADDRESS_FIELDS);
            }
        };

        let is_default = self.addresses.is_empty();
        match self
            .address_gateway
            .create(self.session.telegram_id(), &form, is_default)
            .await
        {
            Ok(address) => {
                let id = address.id;
                self.addresses.push(address);
                self.selected_address = Some(id);
                self.step = DraftStep::Qty;
                self.last_error = None;
                Ok(id)
            }
            Err(error) => {
                tracing::warn!(%error, "address creation failed");
                self.last_error = Some(ADDRESS_CREATE_FAILED.to_owned());
                Err(DraftError::Gateway {
                    message: ADDRESS_CREATE_FAILED.to_owned(),
                })
            }
        }
    }

    /// Adjust one quantity by `delta`, clamping at zero. No upper bound is
    /// enforced here; the backend is authoritative on quota limits.
    pub fn adjust_quantity(&mut self, kind: QuantityKind, delta: i32) {
        let value = match kind {
            QuantityKind::Jv => &mut self.jv_qty,
            QuantityKind::Lv => &mut self.lv_qty,
        };
        *value = value.saturating_add_signed(delta);
    }

    /// Advance from the quantity step to confirmation.
    ///
    /// # Errors
    ///
    /// [`DraftError::Validation`] when the combined quantity is still zero;
    /// the step is left unchanged.
    pub fn advance_to_confirm(&mut self) -> Result<(), DraftError> {
        if self.total_qty() < 1 {
            return self.validation_failure(MIN_QUANTITY_REQUIRED);
        }
        self.step = DraftStep::Confirm;
        self.last_error = None;
        Ok(())
    }

    /// Step back: confirmation returns to quantities, quantities to the
    /// address step.
    pub fn back(&mut self) {
        self.step = match self.step {
            DraftStep::Confirm => DraftStep::Qty,
            DraftStep::Qty | DraftStep::Address => DraftStep::Address,
        };
        self.last_error = None;
    }

    /// Submit the draft.
    ///
    /// The gateway is never invoked unless an address is selected and the
    /// combined quantity is at least one. On success the created order —
    /// including its server-assigned delivery date — is returned and the
    /// workflow is marked complete.
    ///
    /// # Errors
    ///
    /// [`DraftError::Validation`] when a precondition fails locally;
    /// [`DraftError::Gateway`] when the backend rejects the order, carrying
    /// the server's reason when one was provided. Either way the workflow
    /// stays at the confirmation step for a retry.
    pub async fn submit(&mut self) -> Result<Order, DraftError> {
        let Some(address_id) = self.selected_address else {
            return self.validation_failure(ADDRESS_REQUIRED);
        };
        let comment = match self.comment.trim() {
            "" => None,
            trimmed => Some(trimmed.to_owned()),
        };
        let Ok(order) = NewOrder::try_new(address_id, self.jv_qty, self.lv_qty, comment) else {
            return self.validation_failure(MIN_QUANTITY_REQUIRED);
        };

        match self
            .order_gateway
            .create(self.session.telegram_id(), &order)
            .await
        {
            Ok(created) => {
                self.completed = true;
                self.last_error = None;
                Ok(created)
            }
            Err(error) => {
                tracing::warn!(%error, "order submission failed");
                let message = error
                    .server_message()
                    .unwrap_or(ORDER_CREATE_FAILED)
                    .to_owned();
                self.last_error = Some(message.clone());
                Err(DraftError::Gateway { message })
            }
        }
    }

    fn validation_failure<T>(&mut self, message: &str) -> Result<T, DraftError> {
        self.last_error = Some(message.to_owned());
        Err(DraftError::Validation {
            message: message.to_owned(),
        })
    }
}
