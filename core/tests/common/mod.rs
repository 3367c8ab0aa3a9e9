// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use parking_lot::Mutex;
use rof_core::{
  DispatcherConfig, NotificationDispatcher, NotificationEvent, NotificationWorker, Notifier, OrderDraft, OrderService,
  OrderStore, TrackingId, TrackingIdSource, TransitionPolicy, UuidTrackingIds,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

// --- Notifiers ---

/// Records every event it is handed.
#[derive(Default)]
pub struct RecordingNotifier {
  events: Mutex<Vec<NotificationEvent>>,
}

impl RecordingNotifier {
  pub fn events(&self) -> Vec<NotificationEvent> {
    self.events.lock().clone()
  }

  pub fn kinds(&self) -> Vec<&'static str> {
    self.events.lock().iter().map(|e| e.kind()).collect()
  }
}

#[async_trait]
impl Notifier for RecordingNotifier {
  async fn notify(&self, event: &NotificationEvent) -> anyhow::Result<()> {
    self.events.lock().push(event.clone());
    Ok(())
  }
}

/// Counts attempts and always fails.
#[derive(Default)]
pub struct FailingNotifier {
  pub attempts: AtomicUsize,
}

#[async_trait]
impl Notifier for FailingNotifier {
  async fn notify(&self, event: &NotificationEvent) -> anyhow::Result<()> {
    self.attempts.fetch_add(1, Ordering::SeqCst);
    anyhow::bail!("SMTP relay refused {}", event.kind())
  }
}

/// Never finishes within any sensible timeout.
pub struct StalledNotifier;

#[async_trait]
impl Notifier for StalledNotifier {
  async fn notify(&self, _event: &NotificationEvent) -> anyhow::Result<()> {
    tokio::time::sleep(Duration::from_secs(3600)).await;
    Ok(())
  }
}

/// Brings the worker task down on the first event.
pub struct PanickingNotifier;

#[async_trait]
impl Notifier for PanickingNotifier {
  async fn notify(&self, event: &NotificationEvent) -> anyhow::Result<()> {
    panic!("mail transport crashed on {}", event.kind())
  }
}

// --- Tracking id sources ---

/// Hands out the queued ids first, then falls back to random ones.
pub struct ScriptedTrackingIds {
  queue: Mutex<VecDeque<TrackingId>>,
  pub generated: AtomicUsize,
}

impl ScriptedTrackingIds {
  pub fn new(ids: &[&str]) -> Self {
    let queue = ids.iter().map(|raw| TrackingId::parse(raw).expect("valid scripted id")).collect();
    Self {
      queue: Mutex::new(queue),
      generated: AtomicUsize::new(0),
    }
  }
}

impl TrackingIdSource for ScriptedTrackingIds {
  fn generate(&self) -> TrackingId {
    self.generated.fetch_add(1, Ordering::SeqCst);
    self.queue.lock().pop_front().unwrap_or_else(|| UuidTrackingIds.generate())
  }
}

// --- Harness ---

pub struct Harness {
  pub service: OrderService,
  pub notifier: Arc<RecordingNotifier>,
  worker: NotificationWorker,
}

impl Harness {
  /// Must be called from inside a tokio runtime.
  pub fn new() -> Self {
    Self::with_policy(TransitionPolicy::default())
  }

  pub fn with_policy(policy: TransitionPolicy) -> Self {
    Self::with_store(OrderStore::in_memory(), policy)
  }

  pub fn with_store(store: OrderStore, policy: TransitionPolicy) -> Self {
    let notifier = Arc::new(RecordingNotifier::default());
    let (dispatcher, worker) = NotificationDispatcher::spawn(notifier.clone(), DispatcherConfig::default());
    Self {
      service: OrderService::new(store, policy, dispatcher),
      notifier,
      worker,
    }
  }

  /// Drops the service (and with it every dispatcher handle), drains the
  /// queue and returns what the notifier saw.
  pub async fn finish(self) -> Vec<NotificationEvent> {
    let Harness {
      service,
      notifier,
      worker,
    } = self;
    drop(service);
    worker.shutdown().await;
    notifier.events()
  }
}

pub fn draft(full_name: &str) -> OrderDraft {
  OrderDraft {
    full_name: full_name.to_string(),
    phone: "03001234567".to_string(),
    pickup_address: "A".to_string(),
    drop_address: "B".to_string(),
    parcel_type: "Gift".to_string(),
    ..Default::default()
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
