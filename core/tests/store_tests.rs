// tests/store_tests.rs
mod common;
use common::*;
use rof_core::{CoreError, InMemoryOrderRepository, OrderStatus, OrderStore, TrackedOrder, Timeline};
use std::collections::HashSet;
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[test]
fn test_tracking_ids_are_pairwise_distinct() {
  setup_tracing();
  let store = OrderStore::in_memory();
  let ids: HashSet<String> = (0..500)
    .map(|i| store.create(draft(&format!("customer {}", i))).unwrap().tracking_id.to_string())
    .collect();
  assert_eq!(ids.len(), 500);
  assert_eq!(store.len(), 500);
}

#[test]
fn test_colliding_tracking_id_is_regenerated() {
  setup_tracing();
  let source = Arc::new(ScriptedTrackingIds::new(&["ROF-DUPE0001", "ROF-DUPE0001", "ROF-DUPE0001", "ROF-FRESH001"]));
  let store = OrderStore::new(Arc::new(InMemoryOrderRepository::new()), source.clone());

  let first = store.create(draft("first")).unwrap();
  assert_eq!(first.tracking_id.as_str(), "ROF-DUPE0001");

  let second = store.create(draft("second")).unwrap();
  assert_eq!(second.tracking_id.as_str(), "ROF-FRESH001");
  assert_eq!(source.generated.load(Ordering::SeqCst), 4);
}

#[test]
fn test_exhausted_tracking_ids_surface_as_internal_error() {
  setup_tracing();
  let script = vec!["ROF-STUCK001"; 32];
  let source = Arc::new(ScriptedTrackingIds::new(&script));
  let store = OrderStore::new(Arc::new(InMemoryOrderRepository::new()), source);

  store.create(draft("owner")).unwrap();
  assert!(matches!(store.create(draft("unlucky")), Err(CoreError::Internal(_))));
  assert_eq!(store.len(), 1);
}

#[test]
fn test_lookup_accepts_internal_id_or_tracking_id_in_any_case() {
  setup_tracing();
  let source = Arc::new(ScriptedTrackingIds::new(&["ROF-ABC12345"]));
  let store = OrderStore::new(Arc::new(InMemoryOrderRepository::new()), source);
  let order = store.create(draft("Ahmed")).unwrap();

  let by_upper = store.get("ROF-ABC12345").unwrap();
  let by_lower = store.get("rof-abc12345").unwrap();
  let by_id = store.get(&order.id.to_string()).unwrap();
  assert_eq!(by_upper, by_lower);
  assert_eq!(by_upper, by_id);

  assert_eq!(store.get(""), None);
  assert_eq!(store.get("   "), None);
  assert_eq!(store.get("ROF-ZZZZZZZZ"), None);
  assert_eq!(store.get("definitely not an id"), None);
}

#[test]
fn test_validation_failure_stores_nothing() {
  setup_tracing();
  let store = OrderStore::in_memory();
  let mut bad = draft("Ahmed");
  bad.phone = String::new();
  assert!(matches!(store.create(bad), Err(CoreError::Validation(_))));
  assert!(store.is_empty());
}

#[test]
fn test_raw_update_status_reports_resolution() {
  setup_tracing();
  let store = OrderStore::in_memory();
  let order = store.create(draft("Ahmed")).unwrap();

  assert!(store.update_status(order.tracking_id.as_str(), OrderStatus::Rejected, Some("No rider".into())));
  let stored = store.get(order.tracking_id.as_str()).unwrap();
  assert_eq!(stored.status, OrderStatus::Rejected);
  assert_eq!(stored.rejection_reason.as_deref(), Some("No rider"));

  // Moving away from Rejected clears the reason.
  assert!(store.update_status(order.tracking_id.as_str(), OrderStatus::Accepted, Some("ignored".into())));
  assert_eq!(store.get(order.tracking_id.as_str()).unwrap().rejection_reason, None);

  assert!(!store.update_status("ROF-ZZZZZZZZ", OrderStatus::Accepted, None));
  assert!(!store.update_status("", OrderStatus::Accepted, None));
}

#[test]
fn test_list_snapshot_is_detached_from_store() {
  setup_tracing();
  let store = OrderStore::in_memory();
  let order = store.create(draft("Ahmed")).unwrap();

  let mut snapshot = store.list();
  snapshot[0].status = OrderStatus::Delivered;
  snapshot.push(snapshot[0].clone());

  assert_eq!(store.len(), 1);
  assert_eq!(store.get(order.tracking_id.as_str()).unwrap().status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_track_unknown_id_is_not_found_not_error() {
  setup_tracing();
  let h = Harness::new();
  h.service.create_order(draft("Ahmed")).unwrap();
  assert!(h.service.track_order("ROF-ZZZZZZZZ").is_none());
  assert!(h.service.track_order("").is_none());
  h.finish().await;
}

#[tokio::test]
async fn test_track_returns_timeline_for_progress_and_branch_for_rejection() {
  setup_tracing();
  let h = Harness::new();
  let moving = h.service.create_order(draft("Moving")).unwrap();
  let key = moving.tracking_id.to_string().to_lowercase();
  h.service.update_order_status(&key, "Accepted", None).unwrap();

  let TrackedOrder { order, timeline, estimated_time } = h.service.track_order(&key).unwrap();
  assert_eq!(order.id, moving.id);
  assert_eq!(estimated_time, "Calculating...");
  let done: Vec<bool> = timeline.steps().iter().map(|s| s.done).collect();
  assert_eq!(done, vec![true, true, false, false]);
  assert_eq!(timeline.steps()[1].time, order.reached_at(OrderStatus::Accepted));

  let refused = h.service.create_order(draft("Refused")).unwrap();
  h.service
    .update_order_status(refused.tracking_id.as_str(), "Rejected", Some("Outside coverage"))
    .unwrap();
  let tracked = h.service.track_order(refused.tracking_id.as_str()).unwrap();
  assert!(matches!(tracked.timeline, Timeline::Rejected { ref reason, .. } if reason.as_deref() == Some("Outside coverage")));
  h.finish().await;
}
