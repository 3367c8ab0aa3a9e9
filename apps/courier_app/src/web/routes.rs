// apps/courier_app/src/web/routes.rs

use actix_web::web;

use crate::errors::AppError;
use crate::web::handlers::{auth_handlers, contact_handlers, order_handlers, review_handlers};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Mounts every endpoint under `/api`. Admin-only routes take an
/// `AdminSession` argument.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  // Malformed bodies and query strings get the same JSON error shape as everything else.
  cfg
    .app_data(web::JsonConfig::default().error_handler(|err, _req| AppError::Validation(err.to_string()).into()))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| AppError::Validation(err.to_string()).into()));
  cfg.service(
    web::scope("/api")
      .route("/health", web::get().to(health_check_handler))
      .service(web::scope("/auth").route("/login", web::post().to(auth_handlers::login_handler)))
      .service(
        web::scope("/orders")
          .route("/create", web::post().to(order_handlers::create_order_handler))
          .route("/update-status", web::post().to(order_handlers::update_status_handler))
          .route("/track", web::get().to(order_handlers::track_order_handler))
          .route("/list", web::get().to(order_handlers::list_orders_handler)),
      )
      .service(
        web::scope("/contact")
          .route("", web::post().to(contact_handlers::create_contact_handler))
          .route("/list", web::get().to(contact_handlers::list_contacts_handler)),
      )
      .service(
        web::scope("/reviews")
          .route("/create", web::post().to(review_handlers::create_review_handler))
          .route("/list", web::get().to(review_handlers::list_reviews_handler)),
      ),
  );
}
