// apps/courier_app/src/web/handlers/contact_handlers.rs

use actix_web::{web, HttpResponse};
use rof_core::{ContactDraft, CoreError};
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::AdminSession;

#[instrument(name = "handler::create_contact", skip(app_state, req_payload))]
pub async fn create_contact_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<ContactDraft>,
) -> Result<HttpResponse, AppError> {
  app_state
    .contacts
    .create_contact(req_payload.into_inner())
    .map_err(|err| match err {
      CoreError::Validation(_) => AppError::Validation("Name and message are required.".to_string()),
      other => other.into(),
    })?;
  Ok(HttpResponse::Ok().json(json!({ "success": true, "message": "Message sent successfully!" })))
}

#[instrument(name = "handler::list_contacts", skip(app_state, _admin))]
pub async fn list_contacts_handler(
  app_state: web::Data<AppState>,
  _admin: AdminSession,
) -> Result<HttpResponse, AppError> {
  Ok(HttpResponse::Ok().json(json!({ "success": true, "contacts": app_state.contacts.list_contacts() })))
}
