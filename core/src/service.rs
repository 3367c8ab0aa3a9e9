// core/src/service.rs

//! `OrderService` wires the store, lifecycle, query and timeline pieces into
//! the operations the HTTP layer calls.

use std::sync::Arc;
use tracing::{info, instrument};

use crate::error::CoreResult;
use crate::lifecycle::{OrderLifecycle, TransitionOutcome, TransitionPolicy};
use crate::model::{ContactDraft, ContactInquiry, Order, OrderDraft, Review, ReviewDraft};
use crate::notify::{NotificationDispatcher, NotificationEvent};
use crate::query::{OrderQuery, OrderQueryService, Page};
use crate::store::{ContactStore, OrderStore, ReviewStore};
use crate::timeline::TrackedOrder;

#[derive(Debug, Clone)]
pub struct OrderService {
  store: OrderStore,
  lifecycle: OrderLifecycle,
  query: OrderQueryService,
  dispatcher: NotificationDispatcher,
}

impl OrderService {
  pub fn new(store: OrderStore, policy: TransitionPolicy, dispatcher: NotificationDispatcher) -> Self {
    Self {
      lifecycle: OrderLifecycle::new(store.clone(), policy, dispatcher.clone()),
      query: OrderQueryService::new(store.clone()),
      store,
      dispatcher,
    }
  }

  pub fn store(&self) -> &OrderStore {
    &self.store
  }

  pub fn lifecycle(&self) -> &OrderLifecycle {
    &self.lifecycle
  }

  /// Stores a new `Pending` order and queues the "order placed" notification.
  #[instrument(name = "OrderService::create_order", skip_all, err(Display))]
  pub fn create_order(&self, draft: OrderDraft) -> CoreResult<Order> {
    let order = self.store.create(draft)?;
    info!(tracking_id = %order.tracking_id, parcel = %order.details.parcel_type, "Order placed.");
    self.dispatcher.dispatch(NotificationEvent::OrderPlaced(order.clone()));
    Ok(order)
  }

  pub fn update_order_status(&self, id_or_tracking: &str, status: &str, reason: Option<&str>) -> CoreResult<TransitionOutcome> {
    self.lifecycle.change_status(id_or_tracking, status, reason)
  }

  /// Read-only public lookup. Unknown ids are `None`, never an error.
  pub fn track_order(&self, id_or_tracking: &str) -> Option<TrackedOrder> {
    self.store.get(id_or_tracking).map(TrackedOrder::from_order)
  }

  pub fn list_orders(&self, query: &OrderQuery) -> CoreResult<Page<Order>> {
    self.query.list(query)
  }
}

/// Contact inquiries, which also alert the admin mailbox.
#[derive(Debug, Clone)]
pub struct ContactService {
  store: Arc<ContactStore>,
  dispatcher: NotificationDispatcher,
}

impl ContactService {
  pub fn new(store: Arc<ContactStore>, dispatcher: NotificationDispatcher) -> Self {
    Self { store, dispatcher }
  }

  #[instrument(name = "ContactService::create_contact", skip_all, err(Display))]
  pub fn create_contact(&self, draft: ContactDraft) -> CoreResult<ContactInquiry> {
    let inquiry = self.store.create(draft)?;
    self.dispatcher.dispatch(NotificationEvent::ContactReceived(inquiry.clone()));
    Ok(inquiry)
  }

  pub fn list_contacts(&self) -> Vec<ContactInquiry> {
    self.store.list()
  }
}

/// Public reviews. No notifications, no moderation.
#[derive(Debug, Clone, Default)]
pub struct ReviewService {
  store: Arc<ReviewStore>,
}

impl ReviewService {
  pub fn new(store: Arc<ReviewStore>) -> Self {
    Self { store }
  }

  pub fn create_review(&self, draft: ReviewDraft) -> CoreResult<Review> {
    self.store.create(draft)
  }

  pub fn list_reviews(&self) -> Vec<Review> {
    self.store.list()
  }
}
