// src/lib.rs

//! rof-core: order lifecycle and tracking for the Rider of Faisalabad courier service.
//!
//! The crate covers:
//!  - An order store with a pluggable backing repository (in-memory by default).
//!  - `ROF-XXXXXXXX` tracking codes, unique per store and matched case-insensitively.
//!  - The status state machine (Pending → Accepted → In Progress → Delivered, or Rejected).
//!  - The public tracking timeline, projected from per-order status history.
//!  - Filtered, paginated admin listings.
//!  - Fire-and-forget notification dispatch to an external `Notifier`.
//!  - Append-only contact inquiries and reviews.

pub mod error;
pub mod lifecycle;
pub mod model;
pub mod notify;
pub mod query;
pub mod service;
pub mod store;
pub mod timeline;
pub mod tracking;

// --- Re-exports for the Public API ---

pub use crate::error::{CoreError, CoreResult};
pub use crate::lifecycle::{OrderLifecycle, TransitionOutcome, TransitionPolicy};
pub use crate::model::{
  ContactDraft, ContactInquiry, DeliveryType, Order, OrderDraft, OrderId, OrderStatus, ParcelType, Review,
  ReviewDraft,
};
pub use crate::notify::{
  DispatcherConfig, NoopNotifier, NotificationDispatcher, NotificationEvent, NotificationWorker, Notifier,
};
pub use crate::query::{OrderQuery, OrderQueryService, Page, StatusFilter};
pub use crate::service::{ContactService, OrderService, ReviewService};
pub use crate::store::{ContactStore, InMemoryOrderRepository, OrderKey, OrderRepository, OrderStore, ReviewStore};
pub use crate::timeline::{build_timeline, Timeline, TimelineStep, TrackedOrder};
pub use crate::tracking::{TrackingId, TrackingIdSource, UuidTrackingIds};
