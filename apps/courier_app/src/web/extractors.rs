// apps/courier_app/src/web/extractors.rs

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::errors::AppError;
use crate::state::AppState;

/// Present in a handler's arguments means the request carried the admin
/// bearer secret. Anything else is answered with 401 before the handler runs.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

impl FromRequest for AdminSession {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
      return ready(Err(AppError::Internal("AppState is not registered".to_string())));
    };
    let header = req
      .headers()
      .get(header::AUTHORIZATION)
      .and_then(|value| value.to_str().ok());
    ready(state.admin.authorize(header).map(|()| AdminSession))
  }
}
