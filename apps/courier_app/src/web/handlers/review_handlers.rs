// apps/courier_app/src/web/handlers/review_handlers.rs

use actix_web::{web, HttpResponse};
use rof_core::ReviewDraft;
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;

#[instrument(name = "handler::create_review", skip(app_state, req_payload))]
pub async fn create_review_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<ReviewDraft>,
) -> Result<HttpResponse, AppError> {
  let review = app_state.reviews.create_review(req_payload.into_inner())?;
  Ok(HttpResponse::Ok().json(json!({ "success": true, "review": review })))
}

pub async fn list_reviews_handler(app_state: web::Data<AppState>) -> HttpResponse {
  HttpResponse::Ok().json(json!({ "success": true, "reviews": app_state.reviews.list_reviews() }))
}
