// apps/courier_app/src/lib.rs

//! HTTP front end for the Rider of Faisalabad order core.

pub mod config;
pub mod errors;
pub mod services;
pub mod state;
pub mod web;

use rof_core::{
  ContactService, ContactStore, NotificationDispatcher, NotificationWorker, Notifier, OrderService, OrderStore,
  ReviewService, TransitionPolicy,
};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result as AppResult;
use crate::services::auth_service::AdminAuth;
use crate::state::AppState;

/// Builds the shared state and starts the notification worker.
///
/// Must be called from inside a tokio runtime. The returned worker drains
/// outstanding notifications once every `AppState` clone is dropped.
pub fn build_state(config: AppConfig, notifier: Arc<dyn Notifier>) -> AppResult<(AppState, NotificationWorker)> {
  let config = Arc::new(config);
  let admin = Arc::new(AdminAuth::from_config(&config)?);
  let (dispatcher, worker) = NotificationDispatcher::spawn(notifier, config.dispatcher_config());

  let policy = TransitionPolicy::new(config.allow_reject_after_accept);
  let orders = Arc::new(OrderService::new(OrderStore::in_memory(), policy, dispatcher.clone()));
  let contacts = ContactService::new(Arc::new(ContactStore::new()), dispatcher);

  let state = AppState {
    orders,
    contacts,
    reviews: ReviewService::default(),
    admin,
    config,
  };
  Ok((state, worker))
}
