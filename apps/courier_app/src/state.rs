// apps/courier_app/src/state.rs
use crate::config::AppConfig;
use crate::services::auth_service::AdminAuth;
use rof_core::{ContactService, OrderService, ReviewService};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub orders: Arc<OrderService>,
  pub contacts: ContactService,
  pub reviews: ReviewService,
  pub admin: Arc<AdminAuth>,
  pub config: Arc<AppConfig>, // Share loaded config
}
