// apps/courier_app/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use rof_core::CoreError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  /// A well-formed request the current order state does not allow.
  #[error("Conflict: {0}")]
  Conflict(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl AppError {
  /// The text placed in the `message` field of the error body.
  fn public_message(&self) -> &str {
    match self {
      AppError::Validation(m) | AppError::Auth(m) | AppError::NotFound(m) | AppError::Conflict(m) => m,
      // Details stay in the logs.
      AppError::Config(_) | AppError::Internal(_) => "An internal error occurred",
    }
  }
}

impl From<CoreError> for AppError {
  fn from(err: CoreError) -> Self {
    let message = err.user_message();
    match err {
      CoreError::Validation(_) | CoreError::InvalidStatus(_) | CoreError::MissingReason => AppError::Validation(message),
      CoreError::NotFound(_) | CoreError::UnknownOrder { .. } => AppError::NotFound(message),
      CoreError::InvalidTransition { .. } => AppError::Conflict(message),
      // Notification is never surfaced by core operations; map it anyway.
      CoreError::DuplicateTrackingId(_) | CoreError::Notification { .. } | CoreError::Internal(_) => {
        AppError::Internal(message)
      }
    }
  }
}

impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<CoreError>() {
      Ok(core_err) => core_err.into(),
      Err(other) => AppError::Internal(other.to_string()),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Conflict(_) => StatusCode::CONFLICT,
      AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, status = status.as_u16(), "Responding with error");
    }
    HttpResponse::build(status).json(json!({ "success": false, "message": self.public_message() }))
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
