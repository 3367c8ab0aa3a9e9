// core/src/notify.rs

//! Best-effort, fire-and-forget notifications.
//!
//! Operations hand a `NotificationEvent` to the `NotificationDispatcher`,
//! which queues it for a background worker. The worker calls the configured
//! `Notifier` under a timeout and logs any failure. Nothing that happens
//! here can fail or roll back the operation that raised the event.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{event, instrument, Level};

use crate::error::CoreError;
use crate::model::{ContactInquiry, Order};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
  OrderPlaced(Order),
  OrderAccepted(Order),
  OrderRejected { order: Order, reason: String },
  OrderDelivered(Order),
  ContactReceived(ContactInquiry),
}

impl NotificationEvent {
  pub fn kind(&self) -> &'static str {
    match self {
      NotificationEvent::OrderPlaced(_) => "order_placed",
      NotificationEvent::OrderAccepted(_) => "order_accepted",
      NotificationEvent::OrderRejected { .. } => "order_rejected",
      NotificationEvent::OrderDelivered(_) => "order_delivered",
      NotificationEvent::ContactReceived(_) => "contact_received",
    }
  }

  pub fn order(&self) -> Option<&Order> {
    match self {
      NotificationEvent::OrderPlaced(order)
      | NotificationEvent::OrderAccepted(order)
      | NotificationEvent::OrderRejected { order, .. }
      | NotificationEvent::OrderDelivered(order) => Some(order),
      NotificationEvent::ContactReceived(_) => None,
    }
  }
}

/// The outbound side (email, SMS, ...). Implemented outside the core.
#[async_trait]
pub trait Notifier: Send + Sync {
  async fn notify(&self, event: &NotificationEvent) -> anyhow::Result<()>;
}

/// Discards every event. Useful when no mail transport is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
  async fn notify(&self, event: &NotificationEvent) -> anyhow::Result<()> {
    event!(Level::TRACE, kind = event.kind(), "Notification discarded (no notifier configured).");
    Ok(())
  }
}

#[derive(Debug, Clone)]
pub struct DispatcherConfig {
  /// Events waiting for the worker before new ones are dropped.
  pub queue_capacity: usize,
  /// Upper bound on a single `Notifier::notify` call.
  pub send_timeout: Duration,
}

impl Default for DispatcherConfig {
  fn default() -> Self {
    Self {
      queue_capacity: 256,
      send_timeout: Duration::from_secs(5),
    }
  }
}

/// Cloneable handle for raising notification events.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
  tx: mpsc::Sender<NotificationEvent>,
}

/// The background task draining the dispatch queue.
#[derive(Debug)]
pub struct NotificationWorker {
  handle: JoinHandle<()>,
}

impl NotificationDispatcher {
  /// Starts the worker on the current tokio runtime.
  pub fn spawn(notifier: Arc<dyn Notifier>, config: DispatcherConfig) -> (Self, NotificationWorker) {
    let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
    let handle = tokio::spawn(run_worker(rx, notifier, config.send_timeout));
    (Self { tx }, NotificationWorker { handle })
  }

  /// Queues `event` without waiting. A full or closed queue drops the event
  /// with a warning.
  pub fn dispatch(&self, event: NotificationEvent) {
    let kind = event.kind();
    match self.tx.try_send(event) {
      Ok(()) => event!(Level::DEBUG, kind, "Notification queued."),
      Err(mpsc::error::TrySendError::Full(_)) => {
        event!(Level::WARN, kind, "Notification queue full, event dropped.")
      }
      Err(mpsc::error::TrySendError::Closed(_)) => {
        event!(Level::WARN, kind, "Notification worker stopped, event dropped.")
      }
    }
  }
}

impl NotificationWorker {
  /// Waits until every dispatcher clone is dropped and the queue is drained.
  pub async fn shutdown(self) {
    if let Err(join_err) = self.handle.await {
      event!(Level::ERROR, error = %join_err, "Notification worker terminated abnormally.");
    }
  }
}

async fn run_worker(mut rx: mpsc::Receiver<NotificationEvent>, notifier: Arc<dyn Notifier>, send_timeout: Duration) {
  event!(Level::DEBUG, "Notification worker started.");
  while let Some(event) = rx.recv().await {
    deliver(notifier.as_ref(), &event, send_timeout).await;
  }
  event!(Level::DEBUG, "Notification worker stopped.");
}

#[instrument(name = "notify::deliver", skip_all, fields(kind = event.kind(), tracking_id = tracing::field::Empty))]
async fn deliver(notifier: &dyn Notifier, event: &NotificationEvent, send_timeout: Duration) {
  if let Some(order) = event.order() {
    tracing::Span::current().record("tracking_id", tracing::field::display(&order.tracking_id));
  }
  let outcome = match tokio::time::timeout(send_timeout, notifier.notify(event)).await {
    Ok(Ok(())) => Ok(()),
    Ok(Err(source)) => Err(CoreError::Notification { source }),
    Err(_) => Err(CoreError::Notification {
      source: anyhow::anyhow!("timed out after {:?}", send_timeout),
    }),
  };
  match outcome {
    Ok(()) => event!(Level::INFO, "Notification sent."),
    // Swallowed: notification failures never reach the caller.
    Err(err) => event!(Level::ERROR, error = %err, "Notification failed (non-fatal)."),
  }
}
