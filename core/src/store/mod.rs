// core/src/store/mod.rs

//! The order store and the simpler append-only stores for contacts and reviews.

pub mod contacts;
pub mod repository;
pub mod reviews;

pub use contacts::ContactStore;
pub use repository::{InMemoryOrderRepository, OrderKey, OrderRepository};
pub use reviews::ReviewStore;

use chrono::Utc;
use std::sync::Arc;
use tracing::{event, instrument, Level};

use crate::error::{CoreError, CoreResult};
use crate::model::{Order, OrderDraft, OrderId, OrderStatus};
use crate::tracking::{TrackingIdSource, UuidTrackingIds};

/// Upper bound on tracking-id regeneration before `create` gives up.
pub const MAX_TRACKING_ID_ATTEMPTS: usize = 16;

/// Owns the canonical order collection. Everything else works on snapshots.
#[derive(Clone)]
pub struct OrderStore {
  repository: Arc<dyn OrderRepository>,
  tracking_ids: Arc<dyn TrackingIdSource>,
}

impl OrderStore {
  pub fn new(repository: Arc<dyn OrderRepository>, tracking_ids: Arc<dyn TrackingIdSource>) -> Self {
    Self {
      repository,
      tracking_ids,
    }
  }

  /// In-memory store with UUID-derived tracking ids.
  pub fn in_memory() -> Self {
    Self::new(Arc::new(InMemoryOrderRepository::new()), Arc::new(UuidTrackingIds))
  }

  /// Validates `draft`, mints a tracking id that no stored order uses, and
  /// inserts the new `Pending` order.
  #[instrument(name = "OrderStore::create", skip_all, err(Display))]
  pub fn create(&self, draft: OrderDraft) -> CoreResult<Order> {
    let details = draft.validate()?;
    let id = OrderId::new();

    for attempt in 1..=MAX_TRACKING_ID_ATTEMPTS {
      let tracking_id = self.tracking_ids.generate();
      // Cheap pre-check; `insert` is still the authority under the write lock.
      if self.repository.contains_tracking_id(&tracking_id) {
        event!(Level::WARN, %tracking_id, attempt, "Tracking id collision, regenerating.");
        continue;
      }
      let order = Order::new(id, tracking_id, details.clone(), Utc::now());
      match self.repository.insert(order.clone()) {
        Ok(()) => {
          event!(Level::INFO, tracking_id = %order.tracking_id, order_id = %order.id, total = self.repository.len(), "Order added to store.");
          return Ok(order);
        }
        Err(CoreError::DuplicateTrackingId(taken)) => {
          event!(Level::WARN, tracking_id = %taken, attempt, "Tracking id taken at insert, regenerating.");
        }
        Err(other) => return Err(other),
      }
    }

    Err(CoreError::Internal(format!(
      "Could not mint a unique tracking id after {} attempts",
      MAX_TRACKING_ID_ATTEMPTS
    )))
  }

  /// Looks an order up by internal id or tracking code (any case).
  /// Blank, malformed or unknown input all yield `None`.
  pub fn get(&self, id_or_tracking: &str) -> Option<Order> {
    let key = OrderKey::parse(id_or_tracking)?;
    self.repository.find(&key)
  }

  pub fn find(&self, key: &OrderKey) -> Option<Order> {
    self.repository.find(key)
  }

  /// Raw storage-level status write. Performs no transition validation;
  /// returns `false` when the id does not resolve.
  pub fn update_status(&self, id_or_tracking: &str, status: OrderStatus, rejection_reason: Option<String>) -> bool {
    let Some(key) = OrderKey::parse(id_or_tracking) else {
      return false;
    };
    let mut reason = rejection_reason;
    self
      .repository
      .update(&key, &mut |order: &mut Order| {
        order.apply_status(status, reason.take(), Utc::now());
        Ok(())
      })
      .is_ok()
  }

  /// Atomic read-validate-write against one order. See `OrderRepository::update`.
  pub fn modify(&self, key: &OrderKey, apply: &mut dyn FnMut(&mut Order) -> CoreResult<()>) -> CoreResult<Order> {
    self.repository.update(key, apply)
  }

  /// Detached snapshot, most recent first.
  pub fn list(&self) -> Vec<Order> {
    self.repository.snapshot()
  }

  pub fn len(&self) -> usize {
    self.repository.len()
  }

  pub fn is_empty(&self) -> bool {
    self.repository.is_empty()
  }
}

impl std::fmt::Debug for OrderStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("OrderStore").field("orders", &self.len()).finish()
  }
}
