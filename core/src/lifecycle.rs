// core/src/lifecycle.rs

//! The order status state machine.
//!
//! ```text
//! Pending ──► Accepted ──► In Progress ──► Delivered
//!    │            │
//!    └──► Rejected ◄┘   (Accepted → Rejected is configurable)
//! ```
//!
//! `Delivered` and `Rejected` are terminal. Re-applying the current status
//! is a successful no-op that fires no notification.

use chrono::Utc;
use std::collections::{HashMap, HashSet};
use tracing::{event, instrument, Level};

use crate::error::{CoreError, CoreResult};
use crate::model::{Order, OrderStatus};
use crate::notify::{NotificationDispatcher, NotificationEvent};
use crate::store::{OrderKey, OrderStore};

/// Table of permitted `current -> next` status moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPolicy {
  table: HashMap<OrderStatus, HashSet<OrderStatus>>,
}

impl TransitionPolicy {
  /// The standard courier flow. `allow_reject_after_accept` controls whether
  /// an order that was already accepted can still be turned down.
  pub fn new(allow_reject_after_accept: bool) -> Self {
    let mut table: HashMap<OrderStatus, HashSet<OrderStatus>> = HashMap::new();
    table
      .entry(OrderStatus::Pending)
      .or_default()
      .extend([OrderStatus::Accepted, OrderStatus::Rejected]);
    table.entry(OrderStatus::Accepted).or_default().insert(OrderStatus::InProgress);
    if allow_reject_after_accept {
      table.entry(OrderStatus::Accepted).or_default().insert(OrderStatus::Rejected);
    }
    table.entry(OrderStatus::InProgress).or_default().insert(OrderStatus::Delivered);
    Self { table }
  }

  pub fn allows_reject_after_accept(&self) -> bool {
    self.permits(OrderStatus::Accepted, OrderStatus::Rejected)
  }

  /// Whether `from -> to` is a real (non-identity) permitted move.
  pub fn permits(&self, from: OrderStatus, to: OrderStatus) -> bool {
    if from.is_terminal() {
      return false;
    }
    self.table.get(&from).is_some_and(|next| next.contains(&to))
  }

  /// Permitted next states, in canonical status order.
  pub fn next_states(&self, from: OrderStatus) -> Vec<OrderStatus> {
    OrderStatus::ALL
      .into_iter()
      .filter(|to| self.permits(from, *to))
      .collect()
  }

  /// Checks a real move. The identity move is handled by the caller.
  pub fn validate(&self, from: OrderStatus, to: OrderStatus, reason: Option<&str>) -> CoreResult<()> {
    if !self.permits(from, to) {
      return Err(CoreError::InvalidTransition { from, to });
    }
    if to == OrderStatus::Rejected && reason.map_or(true, |r| r.trim().is_empty()) {
      return Err(CoreError::MissingReason);
    }
    Ok(())
  }
}

impl Default for TransitionPolicy {
  fn default() -> Self {
    Self::new(true)
  }
}

/// Result of a successful `transition` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
  /// The order already had the requested status. Nothing was written.
  Unchanged(Order),
  /// The status moved from `previous` to `order.status`.
  Applied {
    order: Order,
    previous: OrderStatus,
    /// A notification was raised. Delivery is still best-effort.
    notified: bool,
  },
}

impl TransitionOutcome {
  pub fn order(&self) -> &Order {
    match self {
      TransitionOutcome::Unchanged(order) => order,
      TransitionOutcome::Applied { order, .. } => order,
    }
  }

  pub fn into_order(self) -> Order {
    match self {
      TransitionOutcome::Unchanged(order) => order,
      TransitionOutcome::Applied { order, .. } => order,
    }
  }

  pub fn is_applied(&self) -> bool {
    matches!(self, TransitionOutcome::Applied { .. })
  }

  pub fn message(&self) -> String {
    match self {
      TransitionOutcome::Unchanged(order) => format!("Status is already set to {}", order.status),
      TransitionOutcome::Applied { order, .. } => format!("Status updated to {}", order.status),
    }
  }
}

/// Validates and applies status changes and raises the matching notification.
#[derive(Debug, Clone)]
pub struct OrderLifecycle {
  store: OrderStore,
  policy: TransitionPolicy,
  dispatcher: NotificationDispatcher,
}

impl OrderLifecycle {
  pub fn new(store: OrderStore, policy: TransitionPolicy, dispatcher: NotificationDispatcher) -> Self {
    Self {
      store,
      policy,
      dispatcher,
    }
  }

  pub fn policy(&self) -> &TransitionPolicy {
    &self.policy
  }

  /// String-typed entry point used by the HTTP layer: parses the status
  /// before resolving the order.
  pub fn change_status(&self, id_or_tracking: &str, status: &str, reason: Option<&str>) -> CoreResult<TransitionOutcome> {
    let target: OrderStatus = status.parse()?;
    let key = OrderKey::parse(id_or_tracking).ok_or_else(|| CoreError::UnknownOrder {
      key: id_or_tracking.to_string(),
    })?;
    self.transition(&key, target, reason)
  }

  /// Moves the order identified by `key` to `target`.
  ///
  /// The read of the current status, the policy check, the write and the
  /// enqueueing of the notification happen inside one store critical
  /// section, so concurrent calls against the same order are linearizable.
  #[instrument(name = "OrderLifecycle::transition", skip(self, reason), fields(order = %key, target = %target), err(Display))]
  pub fn transition(&self, key: &OrderKey, target: OrderStatus, reason: Option<&str>) -> CoreResult<TransitionOutcome> {
    let reason = reason.map(str::trim).filter(|r| !r.is_empty()).map(str::to_string);
    let mut previous: Option<OrderStatus> = None;
    let mut notified = false;

    let order = self.store.modify(key, &mut |order: &mut Order| {
      let from = order.status;
      if from == target {
        previous = None;
        return Ok(());
      }
      self.policy.validate(from, target, reason.as_deref())?;
      order.apply_status(target, reason.clone(), Utc::now());
      previous = Some(from);
      // Queued while the order is still locked, so one order's events keep
      // the order of its status changes. `dispatch` never blocks.
      if let Some(event) = notification_for(order) {
        self.dispatcher.dispatch(event);
        notified = true;
      }
      Ok(())
    })?;

    let Some(previous) = previous else {
      event!(Level::DEBUG, tracking_id = %order.tracking_id, status = %order.status, "Status unchanged, nothing to do.");
      return Ok(TransitionOutcome::Unchanged(order));
    };

    event!(
      Level::INFO,
      tracking_id = %order.tracking_id,
      from = %previous,
      to = %order.status,
      "Order status changed."
    );

    Ok(TransitionOutcome::Applied {
      order,
      previous,
      notified,
    })
  }
}

/// Which customer notification a freshly applied status triggers.
fn notification_for(order: &Order) -> Option<NotificationEvent> {
  match order.status {
    OrderStatus::Accepted => Some(NotificationEvent::OrderAccepted(order.clone())),
    OrderStatus::Rejected => Some(NotificationEvent::OrderRejected {
      order: order.clone(),
      reason: order.rejection_reason.clone().unwrap_or_default(),
    }),
    OrderStatus::Delivered => Some(NotificationEvent::OrderDelivered(order.clone())),
    OrderStatus::Pending | OrderStatus::InProgress => None,
  }
}
