// apps/courier_app/src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use courier_app::config::AppConfig;
use courier_app::services::mailer::EmailNotifier;
use courier_app::web::configure_app_routes;
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // RUST_LOG overrides the default level; LOG_FORMAT=json switches to JSON lines.
  let builder = tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_span_events(FmtSpan::CLOSE);
  if std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
    builder.json().init();
  } else {
    builder.init();
  }

  tracing::info!("Starting courier order server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => cfg,
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
    }
  };
  if app_config.admin_email.is_none() {
    tracing::warn!("ADMIN_EMAIL is not set; admin alerts will be skipped.");
  }

  let notifier = Arc::new(EmailNotifier::new(Arc::new(app_config.clone())));
  let (app_state, worker) = courier_app::build_state(app_config, notifier).map_err(|e| {
    tracing::error!(error = %e, "Failed to initialise application state.");
    std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
  })?;

  let server_address = format!("{}:{}", app_state.config.server_host, app_state.config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  let server_state = app_state.clone();
  let result = HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(server_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await;

  // Every AppState clone is gone once the server has stopped; flush pending mail.
  drop(app_state);
  if tokio::time::timeout(Duration::from_secs(10), worker.shutdown()).await.is_err() {
    tracing::warn!("Notification worker did not drain in time; pending mail dropped.");
  }
  tracing::info!("Server stopped.");
  result
}
