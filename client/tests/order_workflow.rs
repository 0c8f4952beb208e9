//! End-to-end order workflow scenarios against an in-memory backend fixture.
//!
//! The fixture implements the gateway ports the way the real backend
//! behaves at the contract level: it assigns identifiers, computes
//! `total_qty`, assigns a delivery date on creation, and pages history with
//! limit/offset.

use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use pagination::{Page, PageRequest};

use aquavia_client::domain::ports::{
    AddressGateway, CatalogueGateway, GatewayError, OrderGateway,
};
use aquavia_client::domain::{
    Address, AddressId, District, DraftStep, NewAddress, NewOrder, Order, OrderDraftController,
    OrderStatus, OrderUpdate, QuantityKind, project_order,
};
use aquavia_client::session::Session;
use aquavia_client::domain::TelegramId;

const TELEGRAM_ID: i64 = 42;
const USER_ID: i64 = 1;

fn delivery_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 25).expect("valid date")
}

struct FixtureBackend {
    addresses: Mutex<Vec<Address>>,
    orders: Mutex<Vec<Order>>,
    next_id: AtomicI64,
}

impl FixtureBackend {
    fn new() -> Self {
        Self {
            addresses: Mutex::new(Vec::new()),
            orders: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn with_default_address() -> Self {
        let backend = Self::new();
        let id = backend.allocate_id();
        backend.addresses.lock().expect("lock").push(Address {
            id: AddressId::new(id),
            user_id: USER_ID,
            city: "Metro".to_owned(),
            district: "North".to_owned(),
            street: "Oak".to_owned(),
            house: "1".to_owned(),
            is_default: true,
            created_at: Utc::now(),
        });
        backend
    }

    fn with_completed_orders(count: usize) -> Self {
        let backend = Self::new();
        let mut orders = backend.orders.lock().expect("lock");
        for _ in 0..count {
            let id = backend.next_id.fetch_add(1, Ordering::SeqCst);
            orders.push(Order {
                id,
                user_id: USER_ID,
                address_id: Some(AddressId::new(1)),
                jv_qty: 1,
                lv_qty: 0,
                total_qty: 1,
                delivery_date: Some(delivery_date()),
                status: OrderStatus::Completed,
                comment: None,
                created_at: Utc::now(),
                confirmed_at: None,
                operator_id: None,
            });
        }
        drop(orders);
        backend
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

#[async_trait]
impl AddressGateway for FixtureBackend {
    async fn list(&self, _telegram_id: TelegramId) -> Result<Vec<Address>, GatewayError> {
        Ok(self.addresses.lock().expect("lock").clone())
    }

    async fn create(
        &self,
        _telegram_id: TelegramId,
        address: &NewAddress,
        is_default: bool,
    ) -> Result<Address, GatewayError> {
        let created = Address {
            id: AddressId::new(self.allocate_id()),
            user_id: USER_ID,
            city: address.city().to_owned(),
            district: address.district().to_owned(),
            street: address.street().to_owned(),
            house: address.house().to_owned(),
            is_default,
            created_at: Utc::now(),
        };
        self.addresses.lock().expect("lock").push(created.clone());
        Ok(created)
    }

    async fn delete(&self, address_id: AddressId) -> Result<(), GatewayError> {
        self.addresses
            .lock()
            .expect("lock")
            .retain(|address| address.id != address_id);
        Ok(())
    }
}

#[async_trait]
impl CatalogueGateway for FixtureBackend {
    async fn districts(&self) -> Result<Vec<District>, GatewayError> {
        Ok(vec![District {
            id: 1,
            name: "North".to_owned(),
            max_per_day: 15,
            is_active: true,
        }])
    }
}

#[async_trait]
impl OrderGateway for FixtureBackend {
    async fn create(
        &self,
        _telegram_id: TelegramId,
        order: &NewOrder,
    ) -> Result<Order, GatewayError> {
        let created = Order {
            id: self.allocate_id(),
            user_id: USER_ID,
            address_id: Some(order.address_id()),
            jv_qty: order.jv_qty(),
            lv_qty: order.lv_qty(),
            total_qty: order.jv_qty() + order.lv_qty(),
            delivery_date: Some(delivery_date()),
            status: OrderStatus::New,
            comment: order.comment().map(str::to_owned),
            created_at: Utc::now(),
            confirmed_at: None,
            operator_id: None,
        };
        self.orders.lock().expect("lock").push(created.clone());
        Ok(created)
    }

    async fn history(
        &self,
        _telegram_id: TelegramId,
        page: PageRequest,
    ) -> Result<Page<Order>, GatewayError> {
        let orders = self.orders.lock().expect("lock");
        let items: Vec<Order> = orders
            .iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect();
        Ok(Page::new(items, orders.len() as u64))
    }

    async fn active(&self, _telegram_id: TelegramId) -> Result<Option<Order>, GatewayError> {
        Ok(self
            .orders
            .lock()
            .expect("lock")
            .iter()
            .rev()
            .find(|order| !order.status.is_terminal())
            .cloned())
    }

    async fn last_completed(
        &self,
        _telegram_id: TelegramId,
    ) -> Result<Option<Order>, GatewayError> {
        Ok(self
            .orders
            .lock()
            .expect("lock")
            .iter()
            .rev()
            .find(|order| order.status == OrderStatus::Completed)
            .cloned())
    }

    async fn update(&self, order_id: i64, update: &OrderUpdate) -> Result<Order, GatewayError> {
        let mut orders = self.orders.lock().expect("lock");
        let order = orders
            .iter_mut()
            .find(|order| order.id == order_id)
            .ok_or_else(|| GatewayError::not_found("Заказ не найден"))?;
        if let Some(jv_qty) = update.jv_qty {
            order.jv_qty = jv_qty;
        }
        if let Some(lv_qty) = update.lv_qty {
            order.lv_qty = lv_qty;
        }
        if let Some(comment) = &update.comment {
            order.comment = Some(comment.clone());
        }
        order.total_qty = order.jv_qty + order.lv_qty;
        Ok(order.clone())
    }
}

fn session() -> Session {
    Session::new(
        TelegramId::new(TELEGRAM_ID).expect("positive id"),
        "Test User",
        None,
    )
}

async fn controller(
    backend: &Arc<FixtureBackend>,
) -> OrderDraftController<FixtureBackend, FixtureBackend> {
    OrderDraftController::start(
        session(),
        Arc::clone(backend),
        backend.as_ref(),
        Arc::clone(backend),
    )
    .await
}

#[tokio::test]
async fn first_address_becomes_default_and_submission_assigns_a_delivery_date() {
    let backend = Arc::new(FixtureBackend::new());
    let mut draft = controller(&backend).await;
    assert!(draft.addresses().is_empty());

    draft
        .add_new_address("Metro", "North", "Elm", "12")
        .await
        .expect("first address is created");
    let created = draft.addresses().last().expect("address loaded").clone();
    assert!(created.is_default);
    assert_eq!(draft.step(), DraftStep::Qty);

    draft.adjust_quantity(QuantityKind::Jv, 2);
    draft.advance_to_confirm().expect("two containers");
    let order = draft.submit().await.expect("submission succeeds");

    assert_eq!(order.total_qty, 2);
    assert_eq!(order.jv_qty, 2);
    assert_eq!(order.lv_qty, 0);
    assert_eq!(order.delivery_date, Some(delivery_date()));
    assert!(draft.is_completed());
}

#[tokio::test]
async fn second_address_never_overrides_the_existing_default() {
    let backend = Arc::new(FixtureBackend::with_default_address());
    let mut draft = controller(&backend).await;
    assert_eq!(draft.addresses().len(), 1);

    draft
        .add_new_address("Metro", "North", "Elm", "12")
        .await
        .expect("second address is created");

    let created = draft.addresses().last().expect("address loaded");
    assert!(!created.is_default);
    let first = draft.addresses().first().expect("seeded address");
    assert!(first.is_default);
}

#[tokio::test]
async fn submitted_order_shows_as_active_with_only_the_first_step_reached() {
    let backend = Arc::new(FixtureBackend::with_default_address());
    let mut draft = controller(&backend).await;
    let address_id = draft.addresses().first().expect("seeded address").id;

    draft.select_address(address_id);
    draft.adjust_quantity(QuantityKind::Lv, 1);
    draft.advance_to_confirm().expect("one container");
    draft.submit().await.expect("submission succeeds");

    let active = backend
        .active(session().telegram_id())
        .await
        .expect("active order fetch succeeds")
        .expect("an active order exists");
    assert_eq!(active.status, OrderStatus::New);

    let steps = project_order(&active);
    assert_eq!(steps.map(|step| step.reached), [true, false, false, false]);
}

#[tokio::test]
async fn history_pages_through_twenty_five_orders() {
    let backend = Arc::new(FixtureBackend::with_completed_orders(25));
    let telegram_id = session().telegram_id();

    let first_request = PageRequest::new(20, 0).expect("valid request");
    let first_page = backend
        .history(telegram_id, first_request)
        .await
        .expect("first page fetch succeeds");
    assert_eq!(first_page.len(), 20);
    assert_eq!(first_page.total, 25);
    assert!(!first_page.is_last(first_request));

    let second_request = first_request.next();
    assert_eq!(second_request.offset(), 20);
    let second_page = backend
        .history(telegram_id, second_request)
        .await
        .expect("second page fetch succeeds");
    assert_eq!(second_page.len(), 5);
    assert!(second_page.is_last(second_request));
}

#[tokio::test]
async fn deleted_addresses_are_no_longer_selectable() {
    let backend = Arc::new(FixtureBackend::with_default_address());
    let seeded_id = backend
        .list(session().telegram_id())
        .await
        .expect("list succeeds")
        .first()
        .expect("seeded address")
        .id;

    backend.delete(seeded_id).await.expect("delete succeeds");

    let mut draft = controller(&backend).await;
    assert!(draft.addresses().is_empty());
    draft.select_address(seeded_id);
    assert_eq!(draft.step(), DraftStep::Address);
    assert_eq!(draft.selected_address(), None);
}

#[tokio::test]
async fn completed_orders_are_not_active_but_appear_as_last_completed() {
    let backend = Arc::new(FixtureBackend::with_completed_orders(3));
    let telegram_id = session().telegram_id();

    assert!(backend
        .active(telegram_id)
        .await
        .expect("active fetch succeeds")
        .is_none());
    let last = backend
        .last_completed(telegram_id)
        .await
        .expect("last-completed fetch succeeds")
        .expect("a completed order exists");
    assert_eq!(last.status, OrderStatus::Completed);
}
