// core/src/store/repository.rs

//! Backing collections for orders. The in-memory map is the only backend
//! today; durable ones implement the same trait.

use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{event, Level};

use crate::error::{CoreError, CoreResult};
use crate::model::{Order, OrderId};
use crate::tracking::TrackingId;

/// How callers refer to an order: internal id or public tracking code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderKey {
  Id(OrderId),
  Tracking(TrackingId),
}

impl OrderKey {
  /// Resolves free-form input (a UUID or a tracking code in any case).
  /// Blank or unrecognisable input yields `None`.
  pub fn parse(raw: &str) -> Option<Self> {
    let raw = raw.trim();
    if raw.is_empty() {
      return None;
    }
    if let Some(id) = OrderId::parse(raw) {
      return Some(OrderKey::Id(id));
    }
    TrackingId::parse(raw).map(OrderKey::Tracking)
  }
}

impl From<OrderId> for OrderKey {
  fn from(id: OrderId) -> Self {
    OrderKey::Id(id)
  }
}

impl From<TrackingId> for OrderKey {
  fn from(id: TrackingId) -> Self {
    OrderKey::Tracking(id)
  }
}

impl std::fmt::Display for OrderKey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      OrderKey::Id(id) => write!(f, "{}", id),
      OrderKey::Tracking(t) => write!(f, "{}", t),
    }
  }
}

/// Storage contract behind `OrderStore`.
///
/// `update` runs `apply` against a working copy while holding whatever
/// exclusion the backend uses, and commits only if `apply` returns `Ok`.
/// Readers must never observe a half-applied record.
pub trait OrderRepository: Send + Sync {
  /// Fails with `DuplicateTrackingId` if the tracking code is taken.
  fn insert(&self, order: Order) -> CoreResult<()>;

  fn find(&self, key: &OrderKey) -> Option<Order>;

  /// Fails with `UnknownOrder` if `key` does not resolve, or with whatever
  /// `apply` returned.
  fn update(&self, key: &OrderKey, apply: &mut dyn FnMut(&mut Order) -> CoreResult<()>) -> CoreResult<Order>;

  /// All orders, most recently inserted first.
  fn snapshot(&self) -> Vec<Order>;

  fn contains_tracking_id(&self, tracking_id: &TrackingId) -> bool;

  fn len(&self) -> usize;

  fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

#[derive(Debug, Default)]
struct Inner {
  orders: HashMap<OrderId, Order>,
  by_tracking: HashMap<TrackingId, OrderId>,
  // Insertion order; the tail is the newest order.
  recency: Vec<OrderId>,
}

impl Inner {
  fn resolve(&self, key: &OrderKey) -> Option<OrderId> {
    match key {
      OrderKey::Id(id) => self.orders.contains_key(id).then_some(*id),
      OrderKey::Tracking(t) => self.by_tracking.get(t).copied(),
    }
  }
}

/// Process-lifetime order collection guarded by a `parking_lot::RwLock`.
///
/// Guards are never held across `.await` points; every method takes and
/// releases the lock synchronously.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
  inner: RwLock<Inner>,
}

impl InMemoryOrderRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

impl OrderRepository for InMemoryOrderRepository {
  fn insert(&self, order: Order) -> CoreResult<()> {
    let mut inner = self.inner.write();
    if inner.by_tracking.contains_key(&order.tracking_id) {
      return Err(CoreError::DuplicateTrackingId(order.tracking_id.to_string()));
    }
    if inner.orders.contains_key(&order.id) {
      return Err(CoreError::Internal(format!("Order id {} already stored", order.id)));
    }
    inner.by_tracking.insert(order.tracking_id.clone(), order.id);
    inner.recency.push(order.id);
    event!(Level::DEBUG, tracking_id = %order.tracking_id, total = inner.recency.len(), "Order inserted.");
    inner.orders.insert(order.id, order);
    Ok(())
  }

  fn find(&self, key: &OrderKey) -> Option<Order> {
    let inner = self.inner.read();
    let id = inner.resolve(key)?;
    inner.orders.get(&id).cloned()
  }

  fn update(&self, key: &OrderKey, apply: &mut dyn FnMut(&mut Order) -> CoreResult<()>) -> CoreResult<Order> {
    let mut inner = self.inner.write();
    let id = inner
      .resolve(key)
      .ok_or_else(|| CoreError::UnknownOrder { key: key.to_string() })?;
    let stored = inner
      .orders
      .get_mut(&id)
      .ok_or_else(|| CoreError::Internal(format!("Index points at missing order {}", id)))?;

    let mut working = stored.clone();
    apply(&mut working)?;
    *stored = working.clone();
    Ok(working)
  }

  fn snapshot(&self) -> Vec<Order> {
    let inner = self.inner.read();
    inner
      .recency
      .iter()
      .rev()
      .filter_map(|id| inner.orders.get(id).cloned())
      .collect()
  }

  fn contains_tracking_id(&self, tracking_id: &TrackingId) -> bool {
    self.inner.read().by_tracking.contains_key(tracking_id)
  }

  fn len(&self) -> usize {
    self.inner.read().orders.len()
  }
}
