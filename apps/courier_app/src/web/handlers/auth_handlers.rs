// apps/courier_app/src/web/handlers/auth_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct LoginRequestPayload {
  #[serde(default)]
  pub username: String,
  #[serde(default)]
  pub password: String,
}

#[instrument(
    name = "handler::login",
    skip(app_state, req_payload),
    fields(req_username = %req_payload.username)
)]
pub async fn login_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<LoginRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let token = app_state.admin.login(&req_payload.username, &req_payload.password)?;
  Ok(HttpResponse::Ok().json(json!({
      "success": true,
      "token": token,
      "message": "Login successful",
  })))
}
