// apps/courier_app/src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use rof_core::{OrderDraft, OrderQuery, StatusFilter, TransitionOutcome};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::AdminSession;

const TRACK_NOT_FOUND: &str = "Order not found. Please check your tracking ID.";

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusPayload {
  #[serde(default)]
  pub order_id: String,
  #[serde(default)]
  pub status: String,
  pub rejection_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct TrackQuery {
  pub id: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ListQuery {
  pub status: Option<String>,
  pub page: Option<usize>,
  pub limit: Option<usize>,
}

#[instrument(name = "handler::create_order", skip(app_state, req_payload))]
pub async fn create_order_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<OrderDraft>,
) -> Result<HttpResponse, AppError> {
  let order = app_state.orders.create_order(req_payload.into_inner())?;
  Ok(HttpResponse::Ok().json(json!({
      "success": true,
      "trackingId": order.tracking_id,
      "orderId": order.id,
  })))
}

#[instrument(
    name = "handler::update_order_status",
    skip(app_state, _admin, req_payload),
    fields(order_key = %req_payload.order_id, target = %req_payload.status)
)]
pub async fn update_status_handler(
  app_state: web::Data<AppState>,
  _admin: AdminSession,
  req_payload: web::Json<UpdateStatusPayload>,
) -> Result<HttpResponse, AppError> {
  let payload = req_payload.into_inner();
  if payload.order_id.trim().is_empty() || payload.status.trim().is_empty() {
    return Err(AppError::Validation("Order ID and status are required.".to_string()));
  }

  let outcome = app_state.orders.update_order_status(
    &payload.order_id,
    &payload.status,
    payload.rejection_reason.as_deref(),
  )?;
  let message = outcome.message();
  match outcome {
    TransitionOutcome::Unchanged(_) => {
      info!("Status already set, nothing to do.");
      Ok(HttpResponse::Ok().json(json!({ "success": true, "message": message })))
    }
    TransitionOutcome::Applied { order, .. } => Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": message,
        "order": order,
    }))),
  }
}

#[instrument(name = "handler::track_order", skip(app_state, query), fields(key = ?query.id))]
pub async fn track_order_handler(
  app_state: web::Data<AppState>,
  query: web::Query<TrackQuery>,
) -> Result<HttpResponse, AppError> {
  let key = query.id.as_deref().map(str::trim).unwrap_or_default();
  if key.is_empty() {
    return Err(AppError::Validation("Tracking ID is required.".to_string()));
  }
  match app_state.orders.track_order(key) {
    Some(tracked) => Ok(HttpResponse::Ok().json(json!({ "success": true, "order": tracked }))),
    None => {
      warn!("Tracking lookup missed.");
      Err(AppError::NotFound(TRACK_NOT_FOUND.to_string()))
    }
  }
}

#[instrument(name = "handler::list_orders", skip(app_state, _admin))]
pub async fn list_orders_handler(
  app_state: web::Data<AppState>,
  _admin: AdminSession,
  query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
  let query = query.into_inner();
  let order_query = OrderQuery {
    status: StatusFilter::parse(query.status.as_deref())?,
    page: query.page.unwrap_or(1),
    page_size: query.limit.unwrap_or(app_state.config.default_page_size),
  };
  let page = app_state.orders.list_orders(&order_query)?;
  Ok(HttpResponse::Ok().json(json!({
      "success": true,
      "orders": page.items,
      "total": page.total,
      "page": page.page,
      "totalPages": page.total_pages,
  })))
}
